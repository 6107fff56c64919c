//! Retry decorator for transports

use super::transport::HttpTransport;
use super::types::{ApiRequest, ApiResponse};
use crate::error::{TabulaError, TabulaResult, is_transient_status};
use crate::recovery::RetryConfig;
use async_trait::async_trait;
use tokio::time::sleep;
use tracing::{info, warn};

/// Retries idempotent requests on transient failures.
///
/// Non-idempotent requests (record creation, form submission) are sent
/// exactly once.
pub struct RetryingTransport<T> {
    inner: T,
    config: RetryConfig,
}

impl<T: HttpTransport> RetryingTransport<T> {
    pub fn new(inner: T, config: RetryConfig) -> Self {
        Self { inner, config }
    }
}

#[async_trait]
impl<T: HttpTransport> HttpTransport for RetryingTransport<T> {
    async fn send(&self, request: ApiRequest) -> TabulaResult<ApiResponse> {
        if !request.idempotent {
            return self.inner.send(request).await;
        }

        let max_retries = self.config.max_attempts;
        let mut backoff = self.config.backoff();
        let mut attempt = 0;

        loop {
            let outcome = self.inner.send(request.clone()).await;
            let retryable = match &outcome {
                Ok(response) => is_transient_status(response.status),
                Err(error) => error.is_retryable(),
            };

            if !retryable || attempt >= max_retries {
                if attempt > 0 {
                    match &outcome {
                        Ok(response) if response.is_success() => {
                            info!(attempt, url = %request.url, "request succeeded after retry")
                        }
                        _ => warn!(attempts = attempt + 1, url = %request.url, "giving up on request"),
                    }
                }
                return outcome;
            }

            let delay = backoff.next_delay();
            warn!(
                attempt = attempt + 1,
                max_attempts = max_retries + 1,
                delay_ms = delay.as_millis() as u64,
                url = %request.url,
                error = %describe(&outcome),
                "retrying after transient failure"
            );
            sleep(delay).await;
            attempt += 1;
        }
    }
}

fn describe(outcome: &TabulaResult<ApiResponse>) -> String {
    match outcome {
        Ok(response) => TabulaError::http_status(response.status, "").to_string(),
        Err(error) => error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::MockHttpTransport;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn fast_retry(max_attempts: u32) -> RetryConfig {
        RetryConfig::default()
            .with_max_attempts(max_attempts)
            .with_initial_delay(Duration::from_millis(1))
            .with_max_delay(Duration::from_millis(2))
    }

    #[tokio::test]
    async fn test_retries_transient_status_then_succeeds() {
        let calls = AtomicUsize::new(0);
        let mut inner = MockHttpTransport::new();
        inner.expect_send().times(2).returning(move |_| {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok(ApiResponse::empty(503))
            } else {
                Ok(ApiResponse::json(200, json!([])))
            }
        });

        let transport = RetryingTransport::new(inner, fast_retry(3));
        let response = transport
            .send(ApiRequest::get("http://localhost/api/machine"))
            .await
            .expect("eventually succeeds");

        assert_eq!(response.status, 200);
    }

    #[tokio::test]
    async fn test_post_is_never_retried() {
        let mut inner = MockHttpTransport::new();
        inner
            .expect_send()
            .times(1)
            .returning(|req| Err(TabulaError::http("connection reset", req.url)));

        let transport = RetryingTransport::new(inner, fast_retry(3));
        let result = transport
            .send(ApiRequest::post("http://localhost/api/machine", json!({})))
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let mut inner = MockHttpTransport::new();
        inner
            .expect_send()
            .times(3)
            .returning(|req| Err(TabulaError::http("timed out", req.url)));

        let transport = RetryingTransport::new(inner, fast_retry(2));
        let result = transport.send(ApiRequest::delete("http://localhost/x/1")).await;

        assert!(matches!(result, Err(TabulaError::Http { .. })));
    }

    #[tokio::test]
    async fn test_client_errors_return_immediately() {
        let mut inner = MockHttpTransport::new();
        inner
            .expect_send()
            .times(1)
            .returning(|_| Ok(ApiResponse::empty(404)));

        let transport = RetryingTransport::new(inner, fast_retry(3));
        let response = transport
            .send(ApiRequest::put("http://localhost/x/1", json!({})))
            .await
            .expect("send ok");

        assert_eq!(response.status, 404);
    }
}
