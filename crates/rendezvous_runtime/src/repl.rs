//! The interactive console and script runner.
//!
//! Each statement is either an operation, `<name> [json-args]`, or a console
//! command starting with `:`. Blank lines and lines starting with `#` are
//! skipped. A statement continues onto following lines while its JSON has
//! unbalanced braces.

use std::fmt::Write as _;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use rendezvous_foundation::{EntityKind, Error, ErrorKind, Result};
use rendezvous_storage::relationship;
use serde_json::Value;

use crate::editor::{LineEditor, ReadResult, RustylineEditor, default_keywords, is_complete};
use crate::fields::Fields;
use crate::session::Session;

/// What evaluating one statement produced.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// An operation's rendered result.
    Value(Value),
    /// Console command output.
    Message(String),
    /// Nothing to show (blank line or comment).
    Skip,
    /// The user asked to leave.
    Quit,
}

const HELP: &str = "\
Operations:
    get<Kind> {\"id\": ID}                 one record, or null
    list<Kinds>                          every record of a kind
    create<Kind> {\"data\": {...}}         create a record
    update<Kind> {\"id\": ID, \"data\": {...}}
                                         overwrite the given fields
    delete<Kind> {\"id\": ID}              remove a record
    deleteAll<Kinds>                     remove every record of a kind

    Kinds: User, Location, Event, Participant

    Any operation but deleteAll takes \"fields\": [\"user\", ...] to
    resolve only those relationship fields of its result.

Commands:
    :help                this text
    :expand [on|off]     show or set relationship expansion
    :expand Kind.field.. expand only the named fields
    :relations           list relationship fields
    :count               records per collection
    :quit                leave the console";

/// The interactive console.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// Session state (the store and rendering settings).
    session: Session,

    /// Whether to show the welcome banner.
    show_banner: bool,

    /// Primary prompt.
    prompt: String,

    /// Continuation prompt (for multi-line input).
    continuation_prompt: String,
}

impl Repl<RustylineEditor> {
    /// Creates a new console with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new() -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a new console with the given editor.
    ///
    /// The editor is handed every operation name and console command for
    /// completion.
    pub fn with_editor(mut editor: E) -> Self {
        editor.set_keywords(default_keywords());
        let session = Session::new();
        let prompt = session.config().prompt.clone();
        Self {
            editor,
            session,
            show_banner: true,
            prompt,
            continuation_prompt: ".. ".to_string(),
        }
    }

    /// Sets the session for this console, taking its prompt.
    #[must_use]
    pub fn with_session(mut self, session: Session) -> Self {
        self.prompt.clone_from(&session.config().prompt);
        self.session = session;
        self
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Sets the primary prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Returns a reference to the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns a mutable reference to the session.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Runs the console loop until EOF or `:quit`.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails fatally.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            self.print_banner();
        }

        loop {
            match self.read_eval_print() {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    if matches!(e.kind, ErrorKind::Console(_)) {
                        return Err(e);
                    }
                    self.print_error(&e);
                }
            }
        }

        println!("\nGoodbye!");
        Ok(())
    }

    /// Executes one read-eval-print iteration.
    ///
    /// Returns `Ok(true)` to continue, `Ok(false)` to exit.
    fn read_eval_print(&mut self) -> Result<bool> {
        let Some(input) = self.read_input()? else {
            return Ok(false);
        };

        if input.trim().is_empty() {
            return Ok(true);
        }

        self.editor.add_history(&input);

        match self.eval(&input) {
            Ok(Outcome::Quit) => return Ok(false),
            Ok(outcome) => self.print_outcome(&outcome),
            Err(e) => self.print_error(&e),
        }

        Ok(true)
    }

    /// Reads a potentially multi-line statement.
    fn read_input(&mut self) -> Result<Option<String>> {
        let mut input = String::new();
        let mut first_line = true;

        loop {
            let result = if first_line {
                self.editor.read_line(&self.prompt)?
            } else {
                self.editor.read_continuation(&self.continuation_prompt)?
            };

            match result {
                ReadResult::Line(line) => {
                    if first_line {
                        input = line;
                    } else {
                        input.push('\n');
                        input.push_str(&line);
                    }

                    if is_complete(&input) {
                        return Ok(Some(input));
                    }

                    first_line = false;
                }
                ReadResult::Interrupted => {
                    if !first_line {
                        println!("\nInput cancelled.");
                    }
                    return Ok(Some(String::new()));
                }
                ReadResult::Eof => {
                    if first_line {
                        return Ok(None);
                    }
                    return Err(Error::new(ErrorKind::Console(
                        "unexpected EOF in multi-line input".to_string(),
                    )));
                }
            }
        }
    }

    /// Evaluates one statement.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement names an unknown command or
    /// operation, has malformed arguments, or the operation fails.
    pub fn eval(&mut self, input: &str) -> Result<Outcome> {
        let statement = input.trim();
        if statement.is_empty() || statement.starts_with('#') {
            return Ok(Outcome::Skip);
        }

        if let Some(command) = statement.strip_prefix(':') {
            return self.eval_command(command);
        }

        let (name, args) = match statement.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (statement, ""),
        };

        let args = if args.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(args).map_err(|e| {
                Error::invalid_arguments(name, format!("malformed JSON: {e}")).in_operation(name)
            })?
        };

        self.session.run(name, &args).map(Outcome::Value)
    }

    fn eval_command(&mut self, command: &str) -> Result<Outcome> {
        let words: Vec<&str> = command.split_whitespace().collect();
        let (name, args) = words.split_first().map_or(("", &[][..]), |(n, a)| (*n, a));

        let max_args = match name {
            "expand" => usize::MAX,
            "help" | "quit" | "exit" | "relations" | "count" => 0,
            _ => {
                return Err(Error::new(ErrorKind::Console(format!(
                    "unknown command `:{}`, try :help",
                    command.trim()
                ))));
            }
        };
        if args.len() > max_args {
            return Err(Error::new(ErrorKind::Console(format!(
                "too many arguments to `:{name}`"
            ))));
        }

        Ok(match name {
            "help" => Outcome::Message(HELP.to_string()),
            "quit" | "exit" => Outcome::Quit,
            "expand" => {
                self.set_expansion(args)?;
                Outcome::Message(self.expansion_status())
            }
            "relations" => Outcome::Message(
                relationship::schemas()
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            _ => Outcome::Message(self.counts()),
        })
    }

    /// Applies `:expand` arguments: nothing, `on`, `off`, or qualified fields.
    fn set_expansion(&mut self, args: &[&str]) -> Result<()> {
        let fields = match args {
            [] => return Ok(()),
            ["on"] => Fields::All,
            ["off"] => Fields::None,
            names => Fields::qualified(names.iter().copied()).map_err(|name| {
                Error::new(ErrorKind::Console(format!(
                    "unknown relationship field `{name}`, try :relations"
                )))
            })?,
        };
        self.session.set_expand_fields(fields);
        Ok(())
    }

    fn expansion_status(&self) -> String {
        format!("expansion {}", self.session.expand_fields())
    }

    fn counts(&self) -> String {
        let mut out = String::new();
        for kind in EntityKind::ALL {
            let _ = writeln!(
                out,
                "{:<13}{}",
                format!("{}:", kind.plural()),
                self.session.store().count(kind)
            );
        }
        out.truncate(out.trim_end().len());
        out
    }

    /// Evaluates every statement in `source`, stopping at `:quit`.
    ///
    /// `origin` names the source in error context.
    ///
    /// # Errors
    ///
    /// Returns the first failing statement's error, tagged with `origin` and
    /// the line the statement starts on.
    pub fn eval_source(&mut self, source: &str, origin: &str) -> Result<Vec<Outcome>> {
        let mut outcomes = Vec::new();
        for (line, statement) in statements(source, origin)? {
            match self.eval(&statement).map_err(|e| e.at_line(origin, line))? {
                Outcome::Quit => break,
                Outcome::Skip => {}
                outcome => outcomes.push(outcome),
            }
        }
        Ok(outcomes)
    }

    /// Runs a script file, printing each result as it goes.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a statement fails.
    pub fn eval_file(&mut self, path: &Path) -> Result<()> {
        let source = fs::read_to_string(path).map_err(|e| {
            Error::new(ErrorKind::Io(format!(
                "failed to read {}: {e}",
                path.display()
            )))
        })?;
        let origin = path.display().to_string();
        tracing::info!(script = %origin, "running script");

        for (line, statement) in statements(&source, &origin)? {
            match self.eval(&statement).map_err(|e| e.at_line(&origin, line))? {
                Outcome::Quit => break,
                outcome => self.print_outcome(&outcome),
            }
        }
        Ok(())
    }

    /// Prints an outcome to stdout.
    #[allow(clippy::unused_self)]
    fn print_outcome(&self, outcome: &Outcome) {
        match outcome {
            Outcome::Value(value) => {
                let text = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
                println!("\x1b[1m{text}\x1b[0m");
            }
            Outcome::Message(message) => println!("{message}"),
            Outcome::Skip | Outcome::Quit => {}
        }
    }

    /// Prints an error to stderr.
    #[allow(clippy::unused_self)]
    fn print_error(&self, error: &Error) {
        match &error.context {
            Some(context) => eprintln!("\x1b[31mError: {error} ({context})\x1b[0m"),
            None => eprintln!("\x1b[31mError: {error}\x1b[0m"),
        }
    }

    /// Prints the welcome banner.
    #[allow(clippy::unused_self)]
    fn print_banner(&self) {
        println!("\x1b[1;36mRendezvous\x1b[0m v{}", env!("CARGO_PKG_VERSION"));
        println!("Type :help for operations and commands. Use Ctrl+D to exit.\n");

        let _ = io::stdout().flush();
    }
}

/// Splits a script into statements, each paired with its first line number.
fn statements(source: &str, origin: &str) -> Result<Vec<(usize, String)>> {
    let mut out = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (index, line) in source.lines().enumerate() {
        let number = index + 1;
        let (start, mut text) = match pending.take() {
            Some((start, mut text)) => {
                text.push('\n');
                text.push_str(line);
                (start, text)
            }
            None => {
                let trimmed = line.trim();
                if trimmed.is_empty() || trimmed.starts_with('#') {
                    continue;
                }
                (number, line.to_string())
            }
        };

        if is_complete(&text) {
            text.truncate(text.trim_end().len());
            out.push((start, text));
        } else {
            pending = Some((start, text));
        }
    }

    match pending {
        Some((start, _)) => Err(Error::new(ErrorKind::Console(
            "unterminated statement at end of script".to_string(),
        ))
        .at_line(origin, start)),
        None => Ok(out),
    }
}
