//! Error classification used by retry and notice logic

use super::types::TabulaError;

/// Status codes worth another attempt
const TRANSIENT_STATUS: [u16; 4] = [429, 502, 503, 504];

/// Check whether a response status is transient
pub(crate) fn is_transient_status(status: u16) -> bool {
    TRANSIENT_STATUS.contains(&status)
}

impl TabulaError {
    /// Check if this error is worth retrying.
    ///
    /// Transport failures without a status (connection refused, reset,
    /// timeouts) and the transient status codes are retryable. Everything
    /// produced locally is not.
    pub fn is_retryable(&self) -> bool {
        match self {
            TabulaError::Http {
                status_code: Some(code),
                ..
            } => is_transient_status(*code),
            TabulaError::Http {
                status_code: None, ..
            } => true,
            _ => false,
        }
    }

    /// Short category label for notices and logs
    pub fn category(&self) -> &'static str {
        match self {
            TabulaError::Config { .. } => "config",
            TabulaError::Http { .. } => "network",
            TabulaError::Json { .. } | TabulaError::Schema { .. } => "payload",
            TabulaError::InvalidInput { .. } => "input",
            TabulaError::InvalidState { .. } => "state",
            TabulaError::NotFound { .. } => "not_found",
            TabulaError::Cancelled => "cancelled",
            TabulaError::Other { .. } => "other",
        }
    }

    /// Check if the error came from cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, TabulaError::Cancelled)
    }
}
