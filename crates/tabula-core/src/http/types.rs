//! Request and response types exchanged with the transport

use serde_json::Value;
use std::fmt;

/// HTTP methods used by the record API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }

    /// Whether repeating the request cannot create extra server state
    pub fn is_idempotent(&self) -> bool {
        !matches!(self, Method::Post)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A JSON request against the API
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<Value>,
    /// Safe to send more than once
    pub idempotent: bool,
}

impl ApiRequest {
    fn new(method: Method, url: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            method,
            url: url.into(),
            body,
            idempotent: method.is_idempotent(),
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url, None)
    }

    pub fn post(url: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Post, url, Some(body))
    }

    pub fn put(url: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Put, url, Some(body))
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::Delete, url, None)
    }

    /// Mark a request as safe to retry regardless of method
    pub fn idempotent(mut self) -> Self {
        self.idempotent = true;
        self
    }
}

/// A response as seen by the record store
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    /// Parsed JSON body, `None` when the body was empty
    pub body: Option<Value>,
}

impl ApiResponse {
    pub fn new(status: u16, body: Option<Value>) -> Self {
        Self { status, body }
    }

    pub fn json(status: u16, body: Value) -> Self {
        Self::new(status, Some(body))
    }

    pub fn empty(status: u16) -> Self {
        Self::new(status, None)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
