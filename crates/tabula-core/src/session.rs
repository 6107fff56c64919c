//! Component lifetime and request cancellation
//!
//! Each table controller and form owns a [`Session`]. Requests are raced
//! against the session's cancellation token, so a response that arrives after
//! the component was torn down is dropped instead of mutating its state.

use crate::error::{TabulaError, TabulaResult};
use std::future::Future;
use tokio::select;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Default)]
pub struct Session {
    token: CancellationToken,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Run a request unless the session ends first
    pub async fn run<T, F>(&self, request: F) -> TabulaResult<T>
    where
        F: Future<Output = TabulaResult<T>>,
    {
        run_until_cancelled(&self.token, request).await
    }
}

/// Race a request against a token; results that lose the race are discarded
pub async fn run_until_cancelled<T, F>(token: &CancellationToken, request: F) -> TabulaResult<T>
where
    F: Future<Output = TabulaResult<T>>,
{
    if token.is_cancelled() {
        return Err(TabulaError::Cancelled);
    }
    select! {
        biased;
        _ = token.cancelled() => Err(TabulaError::Cancelled),
        result = request => result,
    }
}
