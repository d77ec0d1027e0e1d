//! Line editor abstraction for the console.
//!
//! The console reads through the [`LineEditor`] trait so it can run on
//! rustyline interactively and on a scripted editor in tests.

use std::borrow::Cow;

use rendezvous_foundation::{Error, ErrorKind, Result};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::HistoryHinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Completer, Config, Context, Editor, Helper, Hinter, Validator as RLValidator};

use crate::operation::Operation;

/// Result of reading a line from the editor.
#[derive(Debug)]
pub enum ReadResult {
    /// A line was successfully read.
    Line(String),
    /// User pressed Ctrl+C.
    Interrupted,
    /// User pressed Ctrl+D (EOF).
    Eof,
}

/// Abstraction over line editing.
pub trait LineEditor {
    /// Read a line with the given prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the terminal fails.
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult>;

    /// Read a continuation line (for multi-line input).
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the terminal fails.
    fn read_continuation(&mut self, prompt: &str) -> Result<ReadResult>;

    /// Add a line to history.
    fn add_history(&mut self, line: &str);

    /// Set the words offered for completion at the start of a line.
    fn set_keywords(&mut self, keywords: Vec<String>);
}

/// Console commands offered for completion alongside operation names.
pub const COMMANDS: [&str; 6] = [
    ":help",
    ":expand",
    ":relations",
    ":count",
    ":quit",
    ":exit",
];

/// Operation names followed by console commands.
#[must_use]
pub fn default_keywords() -> Vec<String> {
    let mut keywords = Operation::names();
    keywords.extend(COMMANDS.iter().map(|command| (*command).to_string()));
    keywords
}

#[derive(Helper, Completer, Hinter, RLValidator)]
struct RendezvousHelper {
    #[rustyline(Completer)]
    completer: KeywordCompleter,
    #[rustyline(Hinter)]
    hinter: HistoryHinter,
    #[rustyline(Validator)]
    validator: BraceValidator,
}

impl Highlighter for RendezvousHelper {
    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if default {
            Cow::Owned(format!("\x1b[1;32m{prompt}\x1b[0m"))
        } else {
            Cow::Borrowed(prompt)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(format!("\x1b[2m{hint}\x1b[0m"))
    }
}

/// Completes the first word of a line from a keyword list.
struct KeywordCompleter {
    keywords: Vec<String>,
}

impl Completer for KeywordCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let head = &line[..pos];
        // Only the operation or command word completes; arguments are JSON.
        if head.trim_start().contains(char::is_whitespace) {
            return Ok((pos, Vec::new()));
        }

        let start = head.len() - head.trim_start().len();
        let word = &head[start..];
        let candidates = self
            .keywords
            .iter()
            .filter(|keyword| keyword.starts_with(word))
            .map(|keyword| Pair {
                display: keyword.clone(),
                replacement: keyword.clone(),
            })
            .collect();

        Ok((start, candidates))
    }
}

/// Keeps reading while JSON braces are unbalanced.
#[derive(Default)]
struct BraceValidator;

impl Validator for BraceValidator {
    fn validate(&self, ctx: &mut ValidationContext<'_>) -> rustyline::Result<ValidationResult> {
        if is_complete(ctx.input()) {
            Ok(ValidationResult::Valid(None))
        } else {
            Ok(ValidationResult::Incomplete)
        }
    }
}

/// Returns true unless `input` has an open brace, bracket, or string.
///
/// Comments and console commands are always complete.
#[must_use]
pub fn is_complete(input: &str) -> bool {
    let head = input.trim_start();
    if head.starts_with('#') || head.starts_with(':') {
        return true;
    }

    let mut depth = 0i32;
    let mut in_string = false;
    let mut escape_next = false;

    for c in input.chars() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match c {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            '[' | '{' if !in_string => depth += 1,
            ']' | '}' if !in_string => depth -= 1,
            _ => {}
        }
    }

    depth <= 0 && !in_string
}

/// Line editor implementation using rustyline.
pub struct RustylineEditor {
    editor: Editor<RendezvousHelper, DefaultHistory>,
}

impl RustylineEditor {
    /// Creates a new rustyline-based editor.
    ///
    /// # Errors
    ///
    /// Returns an error if rustyline initialization fails.
    pub fn new() -> Result<Self> {
        let config = Config::builder()
            .auto_add_history(false)
            .max_history_size(1000)
            .map_err(console_error)?
            .build();

        let helper = RendezvousHelper {
            completer: KeywordCompleter {
                keywords: Vec::new(),
            },
            hinter: HistoryHinter::new(),
            validator: BraceValidator,
        };

        let mut editor = Editor::with_config(config).map_err(console_error)?;
        editor.set_helper(Some(helper));

        Ok(Self { editor })
    }
}

fn console_error(error: ReadlineError) -> Error {
    Error::new(ErrorKind::Console(error.to_string()))
}

impl LineEditor for RustylineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadResult::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadResult::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadResult::Eof),
            Err(e) => Err(console_error(e)),
        }
    }

    fn read_continuation(&mut self, prompt: &str) -> Result<ReadResult> {
        self.read_line(prompt)
    }

    fn add_history(&mut self, line: &str) {
        let _ = self.editor.add_history_entry(line);
    }

    fn set_keywords(&mut self, keywords: Vec<String>) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.completer.keywords = keywords;
        }
    }
}
