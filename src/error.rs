//! Error types for the Engage API client
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for the Engage API client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Request Errors
    // ============================================================================
    #[error("Invalid request type: {verb}")]
    InvalidVerb { verb: String },

    #[error("Invalid status code returned ({status})")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Request failed with HTTP {status}: {body}")]
    TransportFailure { status: u16, body: String },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Health check failed: {message}")]
    HealthCheckFailed { message: String },

    // ============================================================================
    // Transport / Decoding Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid verb error
    pub fn invalid_verb(verb: impl Into<String>) -> Self {
        Self::InvalidVerb { verb: verb.into() }
    }

    /// Create an unexpected status error
    pub fn unexpected_status(status: u16, body: impl Into<String>) -> Self {
        Self::UnexpectedStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a transport failure error
    pub fn transport_failure(status: u16, body: impl Into<String>) -> Self {
        Self::TransportFailure {
            status,
            body: body.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a health check error
    pub fn health_check(message: impl Into<String>) -> Self {
        Self::HealthCheckFailed {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// HTTP status carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::UnexpectedStatus { status, .. } | Error::TransportFailure { status, .. } => {
                Some(*status)
            }
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this error is a client-side (4xx) status error
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s))
    }
}

/// Result type alias for the Engage API client
pub type Result<T> = std::result::Result<T, Error>;
