//! Constructor methods for TabulaError

use super::types::TabulaError;

impl TabulaError {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: None,
        }
    }

    /// Create a configuration error with context
    pub fn config_with_context(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: Some(context.into()),
        }
    }

    /// Create a transport error for a URL
    pub fn http(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Http {
            message: message.into(),
            url: Some(url.into()),
            status_code: None,
        }
    }

    /// Create an error for a response with an unexpected status
    pub fn http_status(status: u16, url: impl Into<String>) -> Self {
        Self::Http {
            message: format!("server responded with status {}", status),
            url: Some(url.into()),
            status_code: Some(status),
        }
    }

    /// Create a payload shape error
    pub fn schema(message: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Create an invalid input error with field
    pub fn invalid_input_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create an invalid state error
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Create a new not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            resource_type: None,
        }
    }

    /// Create a not found error with resource type
    pub fn not_found_resource(message: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            resource_type: Some(resource_type.into()),
        }
    }

    /// Create a generic error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}
