//! Core error types for Tabula

use thiserror::Error;

/// Result type alias for Tabula operations
pub type TabulaResult<T> = Result<T, TabulaError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context<C: std::fmt::Display>(self, context: C) -> TabulaResult<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn context<C: std::fmt::Display>(self, context: C) -> TabulaResult<T> {
        self.map_err(|e| TabulaError::other(format!("{}: {}", context, e)))
    }
}

/// Main error type for Tabula
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TabulaError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: Option<String>,
    },

    /// Transport failures and non-success responses
    #[error("HTTP error: {message}")]
    Http {
        message: String,
        url: Option<String>,
        status_code: Option<u16>,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        context: Option<String>,
    },

    /// A fetched payload did not have the expected shape
    #[error("Unexpected payload from {endpoint}: {message}")]
    Schema { message: String, endpoint: String },

    /// Invalid input errors
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        field: Option<String>,
    },

    /// Operation is not allowed in the current component state
    #[error("Invalid state: {message}")]
    InvalidState { message: String },

    /// Resource not found
    #[error("Not found: {message}")]
    NotFound {
        message: String,
        resource_type: Option<String>,
    },

    /// The owning component was torn down before the request finished
    #[error("Request was cancelled")]
    Cancelled,

    /// Generic error with context
    #[error("Error: {message}")]
    Other { message: String },
}

impl From<serde_json::Error> for TabulaError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json {
            message: error.to_string(),
            context: None,
        }
    }
}

impl From<reqwest::Error> for TabulaError {
    fn from(error: reqwest::Error) -> Self {
        Self::Http {
            message: error.to_string(),
            url: error.url().map(|u| u.to_string()),
            status_code: error.status().map(|s| s.as_u16()),
        }
    }
}

impl From<std::io::Error> for TabulaError {
    fn from(error: std::io::Error) -> Self {
        Self::Config {
            message: error.to_string(),
            context: None,
        }
    }
}
