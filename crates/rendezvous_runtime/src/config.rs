//! Configuration for a Rendezvous session.

use std::path::PathBuf;

use crate::fields::Fields;

/// Default console prompt.
pub const DEFAULT_PROMPT: &str = "rendezvous> ";

/// Default log filter when neither `-v` nor `RENDEZVOUS_LOG` is given.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Environment variable that overrides the log filter.
pub const LOG_ENV_VAR: &str = "RENDEZVOUS_LOG";

/// Configuration for a session and its console.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Seed file loaded into the store at start.
    pub seed_path: Option<PathBuf>,

    /// Relationship fields rendered records carry.
    pub expand: Fields,

    /// Primary console prompt.
    pub prompt: String,

    /// `tracing` filter directive used when `RENDEZVOUS_LOG` is unset.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed_path: None,
            expand: Fields::None,
            prompt: DEFAULT_PROMPT.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Builder method to set the seed file.
    #[must_use]
    pub fn with_seed_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.seed_path = Some(path.into());
        self
    }

    /// Builder method to enable/disable expansion of every relationship field.
    #[must_use]
    pub fn with_expand_relations(mut self, expand: bool) -> Self {
        self.expand = Fields::from(expand);
        self
    }

    /// Builder method to expand only the given fields.
    #[must_use]
    pub fn with_expand_fields(mut self, fields: Fields) -> Self {
        self.expand = fields;
        self
    }

    /// Builder method to set the console prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Builder method to set the log filter.
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Maps a `-v` count to a log filter.
    #[must_use]
    pub fn log_filter_for_verbosity(verbose: u8) -> &'static str {
        match verbose {
            0 => DEFAULT_LOG_FILTER,
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
