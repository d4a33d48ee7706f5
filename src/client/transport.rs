//! HTTP transport for the CONS3RT ReST API
//!
//! One authenticated request/response round-trip, nothing more. Retries live
//! in [`retry`](super::retry), chunked uploads in [`upload`](super::upload).
//! Every outbound call carries exactly one credential: a bearer token header
//! or a client certificate at the TLS layer.

use std::path::PathBuf;
use std::time::Duration;

use log::debug;
use reqwest::{Client as HttpClient, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::retry::RetryPolicy;
use crate::config::AuthMode;
use crate::error::{ApiError, ConfigError, Result};

/// Connection settings for the site API, derived once per invocation and
/// read-only afterward.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL, normalized to end with `/`
    pub base_url: String,
    /// Credential mode (token XOR certificate)
    pub auth: AuthMode,
    /// Optional root CA bundle (PEM) to trust
    pub root_ca_bundle: Option<PathBuf>,
    /// Transport-level request timeout
    pub timeout: Duration,
    /// Retry policy shared by all calls
    pub retry: RetryPolicy,
}

impl ApiConfig {
    /// Create a config with default timeout and retry policy.
    pub fn new(base_url: impl Into<String>, auth: AuthMode) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            base_url,
            auth,
            root_ca_bundle: None,
            timeout: Duration::from_secs(120),
            retry: RetryPolicy::default(),
        }
    }

    /// Set the transport timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry policy.
    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Set a root CA bundle to trust in addition to system roots.
    pub fn root_ca_bundle(mut self, path: Option<PathBuf>) -> Self {
        self.root_ca_bundle = path;
        self
    }
}

/// Body payload of an [`ApiRequest`]
#[derive(Debug, Clone)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Bytes(Vec<u8>),
}

/// One ReST request: method, path relative to the base URL, query pairs,
/// extra headers, and an optional body. Cheap to clone so the retry wrapper
/// can re-issue it.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Append a header.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Attach a JSON body.
    pub fn json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    /// Attach a raw octet-stream body.
    pub fn bytes(mut self, body: Vec<u8>) -> Self {
        self.body = RequestBody::Bytes(body);
        self
    }
}

/// One ReST response: status and raw body. JSON decoding happens on demand
/// so callers decide what shape they expect.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    /// Decode the body as JSON into `T`.
    ///
    /// A structural mismatch is a [`ApiError::Parse`], never partial data.
    pub fn json<T: DeserializeOwned>(&self) -> std::result::Result<T, ApiError> {
        serde_json::from_str(&self.body)
            .map_err(|e| ApiError::Parse(format!("Failed to parse response: {}", e)))
    }
}

/// Authenticated HTTP executor against one site
#[derive(Debug)]
pub struct Transport {
    http: HttpClient,
    base_url: String,
    auth: AuthMode,
}

impl Transport {
    /// Build a transport from connection settings.
    ///
    /// Certificate mode loads the client identity into the TLS stack here;
    /// token mode attaches an `Authorization` header per request instead.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut builder = HttpClient::builder().timeout(config.timeout);

        if let AuthMode::Certificate(cert_path) = &config.auth {
            let pem = std::fs::read(cert_path).map_err(|e| {
                ConfigError::Invalid(format!(
                    "Unable to read client certificate {}: {}",
                    cert_path.display(),
                    e
                ))
            })?;
            let identity = reqwest::Identity::from_pem(&pem).map_err(|e| {
                ConfigError::Invalid(format!(
                    "Client certificate {} is not valid PEM: {}",
                    cert_path.display(),
                    e
                ))
            })?;
            builder = builder.identity(identity);
        }

        if let Some(bundle_path) = &config.root_ca_bundle {
            let pem = std::fs::read(bundle_path).map_err(|e| {
                ConfigError::Invalid(format!(
                    "Unable to read root CA bundle {}: {}",
                    bundle_path.display(),
                    e
                ))
            })?;
            let cert = reqwest::Certificate::from_pem(&pem).map_err(|e| {
                ConfigError::Invalid(format!(
                    "Root CA bundle {} is not valid PEM: {}",
                    bundle_path.display(),
                    e
                ))
            })?;
            builder = builder.add_root_certificate(cert);
        }

        let http = builder
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            auth: config.auth.clone(),
        })
    }

    /// Execute one request and map the response status to the error taxonomy.
    pub async fn execute(&self, req: &ApiRequest) -> std::result::Result<ApiResponse, ApiError> {
        let url = format!("{}{}", self.base_url, req.path.trim_start_matches('/'));
        debug!("{} {}", req.method, url);

        let mut builder = self
            .http
            .request(req.method.clone(), &url)
            .header("Accept", "application/json");

        if let AuthMode::Token(token) = &self.auth {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        if !req.query.is_empty() {
            builder = builder.query(&req.query);
        }

        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }

        builder = match &req.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Bytes(bytes) => builder
                .header("Content-Type", "application/octet-stream")
                .body(bytes.clone()),
        };

        let response = builder.send().await.map_err(ApiError::from)?;

        let status = response.status();
        let resource = response.url().path().to_string();
        let body = response.text().await.unwrap_or_default();

        if status.is_success() {
            return Ok(ApiResponse {
                status: status.as_u16(),
                body,
            });
        }

        match status {
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
            StatusCode::FORBIDDEN => Err(ApiError::Forbidden),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound(if body.is_empty() {
                resource
            } else {
                body
            })),
            s if s.is_server_error() => Err(ApiError::Server {
                status: s.as_u16(),
                body,
            }),
            s => Err(ApiError::BadRequest {
                status: s.as_u16(),
                body,
            }),
        }
    }
}
