//! Core error types for workboard-core.
//!
//! Scoring itself never fails. These errors cover the boundaries around it:
//! configuration files, snapshot parsing, date parsing and the quote provider.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for workboard-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Quote provider errors
    #[error("Quote error: {0}")]
    Quote(#[from] QuoteError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-separated key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Home/config directory could not be prepared
    #[error("Configuration directory unavailable: {0}")]
    DirUnavailable(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Unparseable date or datetime string
    #[error("Invalid date '{value}': expected YYYY-MM-DD, YYYY-MM-DDTHH:MM[:SS] or RFC 3339")]
    InvalidDate { value: String },

    /// Unknown filter mode or period name
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Quote provider errors.
#[derive(Error, Debug)]
pub enum QuoteError {
    /// Request could not be sent or timed out
    #[error("Request to {url} failed: {message}")]
    RequestFailed { url: String, message: String },

    /// Non-success HTTP status
    #[error("Quote service returned HTTP {status}")]
    HttpStatus { status: u16 },

    /// Response body did not contain a quote
    #[error("Malformed quote response: {0}")]
    Malformed(String),

    /// Provider has nothing to offer
    #[error("No quotes available")]
    Empty,
}

impl From<reqwest::Error> for QuoteError {
    fn from(err: reqwest::Error) -> Self {
        let url = err
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "<unknown>".to_string());
        QuoteError::RequestFailed {
            url,
            message: err.to_string(),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
