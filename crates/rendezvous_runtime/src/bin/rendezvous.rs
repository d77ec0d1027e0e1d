//! Rendezvous CLI entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use rendezvous_foundation::Result;
use rendezvous_runtime::config::LOG_ENV_VAR;
use rendezvous_runtime::{Config, Fields, LineEditor, ReadResult, Repl, Session};
use rendezvous_storage::RelationshipSchema;
use rendezvous_storage::relationship::schema_by_qualified_name;
use tracing_subscriber::EnvFilter;

/// In-memory store for users, locations, events, and participants
#[derive(Parser, Debug)]
#[command(name = "rendezvous")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Script files to run before the prompt
    scripts: Vec<PathBuf>,

    /// Seed file loaded into the store at start
    #[arg(short, long, value_name = "PATH")]
    seed: Option<PathBuf>,

    /// Run scripts and exit without the interactive prompt
    #[arg(short, long)]
    batch: bool,

    /// Start with relationship expansion enabled
    #[arg(short = 'x', long, conflicts_with = "field")]
    expand: bool,

    /// Start expanding only this relationship field (e.g. Event.participants)
    #[arg(short, long, value_name = "KIND.FIELD", value_parser = relationship_field)]
    field: Vec<RelationshipSchema>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> Config {
        let expand = if self.field.is_empty() {
            Fields::from(self.expand)
        } else {
            Fields::Only(self.field.clone())
        };
        let mut config = Config::default()
            .with_expand_fields(expand)
            .with_log_filter(Config::log_filter_for_verbosity(self.verbose));
        if let Some(seed) = &self.seed {
            config = config.with_seed_path(seed);
        }
        config
    }
}

fn relationship_field(name: &str) -> std::result::Result<RelationshipSchema, String> {
    schema_by_qualified_name(name)
        .ok_or_else(|| format!("`{name}` is not a relationship field (try Event.user)"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = cli.config();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV_VAR)
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    match run(&cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match &e.context {
                Some(context) => eprintln!("\x1b[31mError: {e} ({context})\x1b[0m"),
                None => eprintln!("\x1b[31mError: {e}\x1b[0m"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, config: Config) -> Result<()> {
    let session = Session::from_config(config)?;

    if cli.batch {
        let mut repl = Repl::with_editor(NoInput).with_session(session);
        for script in &cli.scripts {
            repl.eval_file(script)?;
        }
        return Ok(());
    }

    let mut repl = Repl::new()?.with_session(session);
    for script in &cli.scripts {
        repl.eval_file(script)?;
    }

    // Scripts already set the scene.
    if !cli.scripts.is_empty() {
        repl = repl.without_banner();
    }

    repl.run()
}

/// Editor for batch mode, where the prompt is never shown.
struct NoInput;

impl LineEditor for NoInput {
    fn read_line(&mut self, _prompt: &str) -> Result<ReadResult> {
        Ok(ReadResult::Eof)
    }

    fn read_continuation(&mut self, _prompt: &str) -> Result<ReadResult> {
        Ok(ReadResult::Eof)
    }

    fn add_history(&mut self, _line: &str) {}

    fn set_keywords(&mut self, _keywords: Vec<String>) {}
}
