//! Command execution context
//!
//! Provides a unified context for command execution, eliminating boilerplate
//! for config loading, credential validation, and client initialization.
//! The derived connection settings are built here once and passed into the
//! client explicitly; nothing is process-global.

use std::sync::Arc;
use std::time::Duration;

use crate::cli::args::{GlobalOptions, OutputFormat};
use crate::client::transport::ApiConfig;
use crate::client::{Cons3rtClient, RetryPolicy};
use crate::config::Config;
use crate::error::Result;

/// Context for command execution containing config, client, and runtime
/// options.
#[derive(Debug)]
pub struct CommandContext {
    /// Loaded and validated configuration
    pub config: Config,
    /// API client (Arc-wrapped so handlers can move it into closures)
    pub client: Arc<Cons3rtClient>,
    /// Resolved output format
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a command context with full initialization.
    ///
    /// This handles:
    /// - Loading config from the resolved path
    /// - Applying URL and project overrides
    /// - Validating that exactly one credential is configured
    /// - Deriving connection settings (timeout, retry policy)
    /// - Creating the API client
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let mut config = Config::load_at(opts.config_ref())?;

        if let Some(url) = opts.url_ref() {
            config.api_url = url.to_string();
        }
        if let Some(project) = &opts.project {
            config.project = Some(project.clone());
        }

        let api_config = Self::api_config(&config)?;
        let client = Arc::new(Cons3rtClient::new(&api_config)?);

        // Flag/env format wins over the config file preference
        let format = opts
            .format
            .or_else(|| {
                config
                    .preferences
                    .format
                    .as_deref()
                    .and_then(|f| f.parse().ok())
            })
            .unwrap_or_default();

        Ok(Self {
            config,
            client,
            format,
        })
    }

    /// Derive connection settings from a validated config.
    pub fn api_config(config: &Config) -> Result<ApiConfig> {
        let auth = config.auth_mode()?;
        let policy = RetryPolicy::new(
            config.preferences.max_attempts,
            Duration::from_millis(config.preferences.base_delay_ms),
        );
        Ok(ApiConfig::new(config.api_url.clone(), auth)
            .timeout(Duration::from_secs(config.preferences.timeout_secs))
            .retry(policy)
            .root_ca_bundle(config.root_ca_bundle.clone()))
    }

    /// The site URL this context talks to.
    pub fn site_url(&self) -> &str {
        &self.config.api_url
    }

    /// The project in effect, when one is configured.
    pub fn project(&self) -> Option<&str> {
        self.config.project.as_deref()
    }
}
