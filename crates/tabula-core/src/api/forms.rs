//! Schema and submission endpoints of dynamic forms

use crate::error::{TabulaError, TabulaResult};
use crate::http::{ApiRequest, ApiResponse, SharedTransport};
use crate::record::FormValues;
use crate::schema::{FieldDescriptor, parse_schema};
use serde_json::json;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct FormApi {
    transport: SharedTransport,
}

impl FormApi {
    pub fn new(transport: SharedTransport) -> Self {
        Self { transport }
    }

    /// Fetch and validate the field schema.
    ///
    /// The request is a POST with an empty JSON object; it reads only, so it
    /// is marked safe to retry.
    #[instrument(skip(self))]
    pub async fn fetch_schema(&self, endpoint: &str) -> TabulaResult<Vec<FieldDescriptor>> {
        let response = self
            .transport
            .send(ApiRequest::post(endpoint, json!({})).idempotent())
            .await?;
        if !response.is_success() {
            return Err(TabulaError::http_status(response.status, endpoint));
        }

        let body = response
            .body
            .ok_or_else(|| TabulaError::schema("empty schema response", endpoint))?;
        let fields = parse_schema(&body, endpoint)?;
        debug!(fields = fields.len(), "schema fetched");
        Ok(fields)
    }

    /// Post the full form values
    #[instrument(skip(self, values), fields(fields = values.len()))]
    pub async fn submit(&self, endpoint: &str, values: &FormValues) -> TabulaResult<ApiResponse> {
        let response = self
            .transport
            .send(ApiRequest::post(endpoint, values.to_json()))
            .await?;
        if !response.is_success() {
            return Err(TabulaError::http_status(response.status, endpoint));
        }
        Ok(response)
    }
}
