//! Global CLI options shared across all commands
//!
//! Consolidates the global flags into a single unit so handler signatures
//! stay small. Precedence for each option is: CLI flag > environment
//! variable > config file > default. This struct captures the flag/env
//! layer; config-file defaults are resolved in `CommandContext`.

use crate::cli::{Cli, OutputFormat};

/// Global CLI options passed to all command handlers.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Output format, when given on the command line or environment
    pub format: Option<OutputFormat>,

    /// Site ReST API base URL override
    pub url: Option<String>,

    /// Project override
    pub project: Option<String>,

    /// Custom config file path (defaults to ~/.cons3rt/config.json)
    pub config: Option<String>,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            url: cli.url.clone(),
            project: cli.project.clone(),
            config: cli.config.clone(),
        }
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Get the URL override as `Option<&str>`.
    pub fn url_ref(&self) -> Option<&str> {
        self.url.as_deref()
    }
}
