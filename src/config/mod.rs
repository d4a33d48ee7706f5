//! Configuration management for the CONS3RT CLI
//!
//! The config file is JSON, by default at `~/.cons3rt/config.json`. The
//! location can be overridden with the `CONS3RT_CONFIG` environment variable
//! or the `--config` flag (flag wins). Credentials are a project ReST token
//! or a client certificate in PEM format, never both.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Known CONS3RT sites offered during `cons3rt init`.
///
/// Shortname to ReST API base URL.
pub const SITE_CHOICES: &[(&str, &str)] = &[
    ("arcusgov", "https://app.arcus-cloud.io/rest/api/"),
    ("arcusmil", "https://app.arcus.mil/rest/api/"),
    ("cons3rt.com", "https://api.cons3rt.com/rest/api/"),
    ("dev", "https://api.dev.cons3rt.io/rest/api/"),
    ("qa", "https://api.qa.cons3rt.io/rest/api/"),
];

/// Credential for the site API: a project token or a client certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMode {
    /// Bearer-style project ReST token
    Token(String),
    /// Path to a client certificate in PEM format (mutual TLS)
    Certificate(PathBuf),
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site ReST API base URL
    pub api_url: String,

    /// Project ReST API token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Path to a client certificate (PEM) for cert-auth sites
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert: Option<PathBuf>,

    /// Optional root CA bundle (PEM) to trust in addition to system roots
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_ca_bundle: Option<PathBuf>,

    /// Default project name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum attempts for transient failures
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Base backoff delay in milliseconds
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_max_attempts() -> u32 {
    5
}

fn default_base_delay_ms() -> u64 {
    2000
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            format: None,
            timeout_secs: default_timeout_secs(),
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
        }
    }
}

impl Config {
    /// Resolve the config file path from an optional override.
    pub fn resolve_path(path_override: Option<&str>) -> Result<PathBuf> {
        if let Some(path) = path_override {
            return Ok(PathBuf::from(path));
        }

        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".cons3rt").join("config.json"))
    }

    /// Load configuration, honoring an optional path override.
    pub fn load_at(path_override: Option<&str>) -> Result<Self> {
        Self::load_from(Self::resolve_path(path_override)?)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_json::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Save configuration, honoring an optional path override.
    pub fn save_at(&self, path_override: Option<&str>) -> Result<()> {
        self.save_to(Self::resolve_path(path_override)?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::Save(e.to_string()))?;

        std::fs::write(&path, contents)?;

        // Set file permissions to 600 on Unix systems
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// The configured credential: exactly one of token or certificate.
    pub fn auth_mode(&self) -> Result<AuthMode> {
        match (&self.token, &self.cert) {
            (Some(token), None) => Ok(AuthMode::Token(token.clone())),
            (None, Some(cert)) => Ok(AuthMode::Certificate(cert.clone())),
            (None, None) => Err(ConfigError::MissingCredential.into()),
            (Some(_), Some(_)) => Err(ConfigError::AmbiguousCredential.into()),
        }
    }

    /// Validate that required configuration is present
    pub fn validate_auth(&self) -> Result<()> {
        self.auth_mode().map(|_| ())
    }

    /// The configured project name, required for project-scoped calls.
    pub fn require_project(&self) -> Result<&str> {
        self.project
            .as_deref()
            .ok_or_else(|| ConfigError::MissingProject.into())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: SITE_CHOICES[0].1.to_string(),
            token: None,
            cert: None,
            root_ca_bundle: None,
            project: None,
            preferences: Preferences::default(),
        }
    }
}
