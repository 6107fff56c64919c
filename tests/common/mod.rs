//! Scripted transport shared by the integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;
use tabula_core::{
    ApiRequest, ApiResponse, ClientConfig, HttpTransport, SharedTransport, TabulaError,
    TabulaResult,
};
use tokio::sync::Notify;

pub const BASE_URL: &str = "http://records.test/api";

pub fn config() -> ClientConfig {
    ClientConfig::new(BASE_URL)
}

pub fn collection_url() -> String {
    format!("{}/machine", BASE_URL)
}

#[derive(Default)]
struct Script {
    replies: Mutex<VecDeque<TabulaResult<ApiResponse>>>,
    requests: Mutex<Vec<ApiRequest>>,
    gate: Option<Arc<Notify>>,
}

/// Answers requests from a queue of canned replies and records what it was sent
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Script>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold every reply until the gate is notified
    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            script: Arc::new(Script {
                gate: Some(gate),
                ..Default::default()
            }),
        }
    }

    pub fn reply(&self, status: u16, body: Value) -> &Self {
        self.script
            .replies
            .lock()
            .push_back(Ok(ApiResponse::json(status, body)));
        self
    }

    pub fn reply_empty(&self, status: u16) -> &Self {
        self.script
            .replies
            .lock()
            .push_back(Ok(ApiResponse::empty(status)));
        self
    }

    pub fn fail(&self, error: TabulaError) -> &Self {
        self.script.replies.lock().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.script.requests.lock().clone()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.script.requests.lock().last().cloned()
    }

    pub fn shared(&self) -> SharedTransport {
        Arc::new(self.clone())
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> TabulaResult<ApiResponse> {
        let url = request.url.clone();
        self.script.requests.lock().push(request);
        if let Some(gate) = &self.script.gate {
            gate.notified().await;
        }
        let reply = self.script.replies.lock().pop_front();
        reply.unwrap_or_else(|| Err(TabulaError::other(format!("no reply scripted for {}", url))))
    }
}

pub fn machine(id: &str, name: &str, active: bool) -> Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "location": "L",
        "email": "e@x",
        "number": "5",
        "enum": active
    })
}
