//! Machine collection endpoints
//!
//! - `GET  <base>/machine`       list, status as boolean
//! - `POST <base>/machine`       create, answers `{machine_info: <record>}`
//! - `PUT  <base>/machine/{id}`  update, status in display form
//! - `DELETE <base>/machine/{id}`

use crate::config::ClientConfig;
use crate::error::{TabulaError, TabulaResult};
use crate::http::{ApiRequest, ApiResponse, SharedTransport};
use crate::record::{Machine, MachineWire, NewMachine};
use reqwest::Url;
use serde_json::Value;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct MachineApi {
    transport: SharedTransport,
    collection_url: String,
}

impl MachineApi {
    pub fn new(transport: SharedTransport, config: &ClientConfig) -> Self {
        Self {
            transport,
            collection_url: config.collection_url(),
        }
    }

    pub fn collection_url(&self) -> &str {
        &self.collection_url
    }

    /// URL of one record; the id is percent-encoded as a single path segment
    pub fn record_url(&self, id: &str) -> TabulaResult<String> {
        let mut url = Url::parse(&self.collection_url).map_err(|e| {
            TabulaError::config_with_context(
                format!("invalid collection URL: {}", e),
                self.collection_url.clone(),
            )
        })?;
        url.path_segments_mut()
            .map_err(|()| {
                TabulaError::config_with_context(
                    "collection URL cannot have path segments",
                    self.collection_url.clone(),
                )
            })?
            .pop_if_empty()
            .push(id);
        Ok(url.into())
    }

    /// Fetch the whole collection in display form
    #[instrument(skip(self), fields(url = %self.collection_url))]
    pub async fn list(&self) -> TabulaResult<Vec<Machine>> {
        let response = self
            .transport
            .send(ApiRequest::get(&self.collection_url))
            .await?;
        if !response.is_success() {
            return Err(TabulaError::http_status(response.status, &self.collection_url));
        }

        let body = response.body.ok_or_else(|| {
            TabulaError::schema("empty response, expected a record array", &self.collection_url)
        })?;
        let Value::Array(items) = body else {
            return Err(TabulaError::schema(
                "expected a record array",
                &self.collection_url,
            ));
        };

        let machines = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value::<MachineWire>(item)
                    .map(Machine::from)
                    .map_err(|e| {
                        TabulaError::schema(
                            format!("record {} is malformed: {}", index, e),
                            &self.collection_url,
                        )
                    })
            })
            .collect::<TabulaResult<Vec<_>>>()?;

        debug!(count = machines.len(), "collection fetched");
        Ok(machines)
    }

    /// Create a record and return the server's canonical copy
    #[instrument(skip(self, machine), fields(url = %self.collection_url))]
    pub async fn create(&self, machine: &NewMachine) -> TabulaResult<Machine> {
        let body = serde_json::to_value(machine)?;
        let response = self
            .transport
            .send(ApiRequest::post(&self.collection_url, body))
            .await?;
        if !response.is_success() {
            return Err(TabulaError::http_status(response.status, &self.collection_url));
        }

        let info = response
            .body
            .and_then(|mut body| body.get_mut("machine_info").map(Value::take))
            .ok_or_else(|| {
                TabulaError::schema("missing `machine_info` in response", &self.collection_url)
            })?;
        let wire: MachineWire = serde_json::from_value(info).map_err(|e| {
            TabulaError::schema(
                format!("`machine_info` is malformed: {}", e),
                &self.collection_url,
            )
        })?;

        Ok(Machine::from(wire))
    }

    /// Send the full record; the caller interprets the status
    #[instrument(skip(self, machine), fields(id = %machine.id))]
    pub async fn update(&self, machine: &Machine) -> TabulaResult<ApiResponse> {
        let body = machine.to_update_body()?;
        self.transport
            .send(ApiRequest::put(self.record_url(&machine.id)?, body))
            .await
    }

    /// Delete a record; the caller interprets the status
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> TabulaResult<ApiResponse> {
        self.transport
            .send(ApiRequest::delete(self.record_url(id)?))
            .await
    }
}
