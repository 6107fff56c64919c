//! reqwest-backed transport

use super::transport::HttpTransport;
use super::types::{ApiRequest, ApiResponse, Method};
use crate::config::ClientConfig;
use crate::error::{TabulaError, TabulaResult};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, instrument, warn};

/// Production transport speaking JSON over HTTP
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport from the client configuration.
    ///
    /// Every request declares `Content-Type: application/json` and
    /// `Accept: application/json`; configured headers are added on top.
    pub fn new(config: &ClientConfig) -> TabulaResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        for (key, value) in &config.headers {
            match (
                HeaderName::from_bytes(key.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(val)) => {
                    headers.insert(name, val);
                }
                _ => warn!(header = %key, "skipping invalid header"),
            }
        }

        let client = Client::builder()
            .connect_timeout(config.timeouts.connection_timeout())
            .timeout(config.timeouts.request_timeout())
            .default_headers(headers)
            .build()
            .map_err(|e| {
                TabulaError::config_with_context(
                    format!("Failed to create HTTP client: {}", e),
                    "building reqwest client",
                )
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn send(&self, request: ApiRequest) -> TabulaResult<ApiResponse> {
        let builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
            Method::Put => self.client.put(&request.url),
            Method::Delete => self.client.delete(&request.url),
        };
        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let response = builder
            .send()
            .await
            .map_err(|e| TabulaError::http(e.to_string(), request.url.clone()))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| TabulaError::http(e.to_string(), request.url.clone()))?;

        debug!(status, bytes = text.len(), "response received");

        let body = if text.trim().is_empty() {
            None
        } else {
            match serde_json::from_str(&text) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!(status, error = %e, "response body is not JSON");
                    None
                }
            }
        };

        Ok(ApiResponse { status, body })
    }
}
