//! Transport trait

use super::types::{ApiRequest, ApiResponse};
use crate::error::TabulaResult;
use async_trait::async_trait;
use std::sync::Arc;

/// Sends one JSON request and returns the response.
///
/// Implementations report transport failures (connection, timeout, unreadable
/// body) as errors. Any status code the server returns is a successful send;
/// callers decide what a status means.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> TabulaResult<ApiResponse>;
}

/// Transport shared between the table controller, forms and spawned tasks
pub type SharedTransport = Arc<dyn HttpTransport>;
