//! Error types for catalog loading, configuration and the heritage directory.

use std::time::Duration;
use thiserror::Error;

/// Result alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Coarse classification of a [`CatalogError`].
///
/// Used for logging only. Presentation code displays the message and offers
/// a retry; it never branches on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogErrorKind {
    /// The endpoint configuration is unusable.
    Configuration,
    /// The request could not be sent or no response arrived.
    Transport,
    /// A response arrived with a non-success HTTP status.
    Protocol,
    /// The response body is not the expected double-encoded envelope.
    Decode,
}

/// Errors produced while fetching and decoding the remote catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The configured endpoint is not an absolute http(s) URL
    #[error("Invalid catalog endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    /// Network failure, DNS failure, connection refused, or body read failure
    #[error("Catalog request failed: {0}")]
    Transport(String),

    /// No response within the configured client timeout
    #[error("Catalog request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    /// Non-2xx HTTP status
    #[error("API request failed: {status}")]
    Status { status: u16 },

    /// Outer envelope is not JSON or has no string `body` field
    #[error("Failed to decode catalog envelope: {0}")]
    Envelope(String),

    /// The `body` string is not a JSON array of heritage models
    #[error("Failed to decode catalog body: {0}")]
    Body(#[source] serde_json::Error),
}

impl CatalogError {
    /// Classify this error for logging.
    pub fn kind(&self) -> CatalogErrorKind {
        match self {
            CatalogError::InvalidEndpoint { .. } => CatalogErrorKind::Configuration,
            CatalogError::Transport(_) | CatalogError::Timeout(_) => CatalogErrorKind::Transport,
            CatalogError::Status { .. } => CatalogErrorKind::Protocol,
            CatalogError::Envelope(_) | CatalogError::Body(_) => CatalogErrorKind::Decode,
        }
    }

    /// Map a reqwest failure onto the transport variants.
    pub(crate) fn from_reqwest(error: reqwest::Error, timeout: Duration) -> Self {
        if error.is_timeout() {
            return CatalogError::Timeout(timeout);
        }
        if error.is_connect() {
            return CatalogError::Transport(format!("connection error: {error}"));
        }
        CatalogError::Transport(error.to_string())
    }
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Figment could not extract the configuration
    #[error("Failed to load configuration: {0}")]
    Extract(#[from] Box<figment::Error>),

    /// Configuration loaded but a value is unusable
    #[error("Invalid configuration value for key '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        ConfigError::Extract(Box::new(error))
    }
}

/// Errors raised while reading the embedded heritage directory.
#[derive(Error, Debug)]
pub enum ContentError {
    /// The embedded YAML document does not match the directory schema
    #[error("Failed to parse heritage directory: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    /// Two entries share a route slug
    #[error("Duplicate {section} slug '{slug}' in heritage directory")]
    DuplicateSlug { section: &'static str, slug: String },
}
