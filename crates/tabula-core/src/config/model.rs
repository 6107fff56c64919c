//! Configuration data types

use crate::config::timeouts;
use crate::error::{TabulaError, TabulaResult};
use crate::recovery::RetryConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Default collection path below the base URL
pub const DEFAULT_MACHINE_PATH: &str = "machine";

/// Timeouts applied by the HTTP transport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    pub connect_secs: u64,
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: timeouts::CONNECTION_SECS,
            request_secs: timeouts::REQUEST_SECS,
        }
    }
}

impl TimeoutConfig {
    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }
}

/// Timeouts one configuration source sets; unset fields leave the merged value alone
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TimeoutLayer {
    pub connect_secs: Option<u64>,
    pub request_secs: Option<u64>,
}

/// Fields one configuration source actually sets
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConfigLayer {
    pub base_url: Option<String>,
    pub machine_path: Option<String>,
    pub timeouts: TimeoutLayer,
    pub retry: Option<RetryConfig>,
    pub headers: HashMap<String, String>,
}

impl From<ClientConfig> for ConfigLayer {
    fn from(config: ClientConfig) -> Self {
        Self {
            base_url: Some(config.base_url),
            machine_path: Some(config.machine_path),
            timeouts: TimeoutLayer {
                connect_secs: Some(config.timeouts.connect_secs),
                request_secs: Some(config.timeouts.request_secs),
            },
            retry: Some(config.retry),
            headers: config.headers,
        }
    }
}

/// Settings for talking to the record API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL every endpoint is resolved against
    pub base_url: String,
    /// Path of the managed collection
    pub machine_path: String,
    pub timeouts: TimeoutConfig,
    pub retry: RetryConfig,
    /// Extra headers sent with every request
    pub headers: HashMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            machine_path: DEFAULT_MACHINE_PATH.to_string(),
            timeouts: TimeoutConfig::default(),
            retry: RetryConfig::default(),
            headers: HashMap::new(),
        }
    }
}

impl ClientConfig {
    /// Create a config for the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// URL of the whole collection
    pub fn collection_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.machine_path.trim_matches('/')
        )
    }

    /// Resolve an endpoint that may be relative to the base URL
    pub fn resolve(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.to_string()
        } else {
            format!(
                "{}/{}",
                self.base_url.trim_end_matches('/'),
                endpoint.trim_start_matches('/')
            )
        }
    }

    /// Check the configuration for values the transport cannot use
    pub fn validate(&self) -> TabulaResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(TabulaError::config_with_context(
                format!("base_url must be an http(s) URL, got '{}'", self.base_url),
                "validating base_url",
            ));
        }
        if self.machine_path.trim_matches('/').is_empty() {
            return Err(TabulaError::config("machine_path must not be empty"));
        }
        if self.timeouts.connect_secs == 0 || self.timeouts.request_secs == 0 {
            return Err(TabulaError::config("timeouts must be greater than zero"));
        }
        Ok(())
    }

    /// Apply every field the layer sets, even when it equals the default
    pub fn merge(&mut self, layer: ConfigLayer) {
        if let Some(base_url) = layer.base_url {
            self.base_url = base_url;
        }
        if let Some(machine_path) = layer.machine_path {
            self.machine_path = machine_path;
        }
        if let Some(secs) = layer.timeouts.connect_secs {
            self.timeouts.connect_secs = secs;
        }
        if let Some(secs) = layer.timeouts.request_secs {
            self.timeouts.request_secs = secs;
        }
        if let Some(retry) = layer.retry {
            self.retry = retry;
        }
        self.headers.extend(layer.headers);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let config = ClientConfig::new("http://example.com/api/");
        assert_eq!(config.collection_url(), "http://example.com/api/machine");
        assert_eq!(
            config.resolve("/schema/machine"),
            "http://example.com/api/schema/machine"
        );
        assert_eq!(config.resolve("https://other/x"), "https://other/x");
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let config = ClientConfig::new("ftp://example.com");
        assert!(matches!(
            config.validate(),
            Err(TabulaError::Config { .. })
        ));
        assert!(ClientConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = ClientConfig::default();
        config.timeouts.request_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_merge_applies_only_set_fields() {
        let mut base = ClientConfig::new("http://a/api");
        let mut headers = ClientConfig::default().with_header("X-Tenant", "t1").headers;
        headers.insert("X-Trace".into(), "on".into());
        let layer = ConfigLayer {
            timeouts: TimeoutLayer {
                request_secs: Some(5),
                ..Default::default()
            },
            headers,
            ..Default::default()
        };

        base.merge(layer);

        assert_eq!(base.base_url, "http://a/api");
        assert_eq!(base.timeouts.request_secs, 5);
        assert_eq!(base.timeouts.connect_secs, timeouts::CONNECTION_SECS);
        assert_eq!(base.headers.get("X-Tenant").map(String::as_str), Some("t1"));
    }

    #[test]
    fn test_merge_can_restore_default_value() {
        let mut base = ClientConfig::new("http://from-file/api");
        base.merge(ConfigLayer {
            base_url: Some(DEFAULT_BASE_URL.to_string()),
            ..Default::default()
        });
        assert_eq!(base.base_url, DEFAULT_BASE_URL);
    }
}
