//! Error types for the CONS3RT CLI
//!
//! One closed taxonomy for the whole crate. Lower layers return these
//! directly; the CLI boundary in `main` is the only place they are turned
//! into exit codes and human-readable messages.

use thiserror::Error;

/// Result type alias for CONS3RT operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    Other(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

impl Error {
    /// Categorized process exit code for this error.
    ///
    /// Codes follow the sysexits.h ranges where one fits (65 data, 66 input,
    /// 67 not-found, 70 internal, 78 config) with application-specific codes
    /// from 100 up. Exit code 0 is success and never produced here.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Api(api) => api.exit_code(),
            Error::Config(_) => 78,
            Error::Asset(AssetError::Validation { .. }) => 65,
            Error::Asset(AssetError::Package(_)) => 70,
            Error::Upload(_) => 103,
            Error::Io(_) => 66,
            Error::InvalidArgument(_) => 64,
            Error::Json(_) => 65,
            Error::Dialoguer(_) | Error::Other(_) => 70,
        }
    }
}

/// API-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication rejected by the site. Check your project token or certificate.")]
    Unauthorized,

    #[error("Access denied. Your project does not have permission for this resource.")]
    Forbidden,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request (HTTP {status}): {body}")]
    BadRequest { status: u16, body: String },

    #[error("Server error (HTTP {status}): {body}")]
    Server { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    Parse(String),

    #[error("Request failed after {attempts} attempts: {source}")]
    Exhausted {
        attempts: u32,
        #[source]
        source: Box<ApiError>,
    },
}

impl ApiError {
    /// The HTTP status behind this error, when there is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::Forbidden => Some(403),
            ApiError::NotFound(_) => Some(404),
            ApiError::BadRequest { status, .. } | ApiError::Server { status, .. } => Some(*status),
            ApiError::Exhausted { source, .. } => source.status(),
            _ => None,
        }
    }

    fn exit_code(&self) -> i32 {
        match self {
            ApiError::Unauthorized | ApiError::Forbidden => 100,
            ApiError::NotFound(_) => 67,
            ApiError::Network(_) => 101,
            ApiError::Parse(_) => 65,
            ApiError::BadRequest { .. } | ApiError::Server { .. } => 102,
            ApiError::Exhausted { source, .. } => source.exit_code(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to the site API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found. Run `cons3rt init` to set up.")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    Save(String),

    #[error("No credential configured. Set either a project token or a client certificate.")]
    MissingCredential,

    #[error("Both a token and a certificate are configured. Exactly one is allowed.")]
    AmbiguousCredential,

    #[error("No project configured. Set one in the config file or pass --project.")]
    MissingProject,
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// Asset packaging and validation errors
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Asset validation failed [{key}]: {reason}")]
    Validation { key: String, reason: String },

    #[error("Unable to create asset zip: {0}")]
    Package(String),
}

impl AssetError {
    /// Shorthand for a validation failure tagged with the offending key.
    pub fn validation(key: impl Into<String>, reason: impl Into<String>) -> Self {
        AssetError::Validation {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// A chunk exhausted its retries during an upload
#[derive(Debug, Error)]
#[error("Upload of part {part_index} failed: {source}")]
pub struct UploadError {
    pub part_index: u32,
    #[source]
    pub source: ApiError,
}
