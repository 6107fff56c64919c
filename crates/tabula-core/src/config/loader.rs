//! Configuration loading and management

use crate::config::model::{ClientConfig, ConfigLayer};
use crate::error::{TabulaError, TabulaResult};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "tabula_config.json";

/// Environment variables understood by the loader
const ENV_BASE_URL: &str = "TABULA_BASE_URL";
const ENV_MACHINE_PATH: &str = "TABULA_MACHINE_PATH";
const ENV_REQUEST_TIMEOUT: &str = "TABULA_REQUEST_TIMEOUT_SECS";
const ENV_CONNECT_TIMEOUT: &str = "TABULA_CONNECT_TIMEOUT_SECS";

/// Source of configuration data
#[derive(Debug, Clone)]
pub enum ConfigSource {
    /// Configuration from a JSON file
    File(PathBuf),
    /// Configuration from `TABULA_*` environment variables
    Environment,
    /// Explicit key/value overrides, keyed like the environment variables
    Overrides(HashMap<String, String>),
    /// Default configuration
    Default,
}

/// Configuration loader with support for multiple sources
#[derive(Debug, Default)]
pub struct ConfigLoader {
    sources: Vec<ConfigSource>,
}

impl ConfigLoader {
    /// Create a new config loader
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Add a configuration source
    pub fn add_source(mut self, source: ConfigSource) -> Self {
        self.sources.push(source);
        self
    }

    /// Add a file source
    pub fn with_file<P: AsRef<Path>>(self, path: P) -> Self {
        self.add_source(ConfigSource::File(path.as_ref().to_path_buf()))
    }

    /// Add environment variables source
    pub fn with_env(self) -> Self {
        self.add_source(ConfigSource::Environment)
    }

    /// Add explicit overrides
    pub fn with_overrides(self, overrides: HashMap<String, String>) -> Self {
        self.add_source(ConfigSource::Overrides(overrides))
    }

    /// Add default configuration source
    pub fn with_defaults(self) -> Self {
        self.add_source(ConfigSource::Default)
    }

    /// Load configuration from all sources, later sources winning
    pub fn load(self) -> TabulaResult<ClientConfig> {
        let mut config = ClientConfig::default();

        for source in &self.sources {
            let layer = load_from_source(source)?;
            config.merge(layer);
        }

        config.validate()?;
        tracing::debug!(
            base_url = %config.base_url,
            machine_path = %config.machine_path,
            "configuration loaded"
        );
        Ok(config)
    }
}

fn load_from_source(source: &ConfigSource) -> TabulaResult<ConfigLayer> {
    match source {
        ConfigSource::File(path) => load_from_file(path),
        ConfigSource::Environment => {
            let vars: HashMap<String, String> = [
                ENV_BASE_URL,
                ENV_MACHINE_PATH,
                ENV_REQUEST_TIMEOUT,
                ENV_CONNECT_TIMEOUT,
            ]
            .iter()
            .filter_map(|key| env::var(key).ok().map(|value| (key.to_string(), value)))
            .collect();
            apply_overrides(&vars)
        }
        ConfigSource::Overrides(vars) => apply_overrides(vars),
        ConfigSource::Default => Ok(ConfigLayer::from(ClientConfig::default())),
    }
}

fn load_from_file(path: &Path) -> TabulaResult<ConfigLayer> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "config file not found, skipping");
        return Ok(ConfigLayer::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        TabulaError::config_with_context(
            format!("Failed to read config file: {}", e),
            path.display().to_string(),
        )
    })?;

    serde_json::from_str(&content).map_err(|e| {
        TabulaError::config_with_context(
            format!("Failed to parse config file: {}", e),
            path.display().to_string(),
        )
    })
}

fn apply_overrides(vars: &HashMap<String, String>) -> TabulaResult<ConfigLayer> {
    let mut layer = ConfigLayer {
        base_url: vars.get(ENV_BASE_URL).cloned(),
        machine_path: vars.get(ENV_MACHINE_PATH).cloned(),
        ..Default::default()
    };
    if let Some(secs) = vars.get(ENV_REQUEST_TIMEOUT) {
        layer.timeouts.request_secs = Some(parse_secs(ENV_REQUEST_TIMEOUT, secs)?);
    }
    if let Some(secs) = vars.get(ENV_CONNECT_TIMEOUT) {
        layer.timeouts.connect_secs = Some(parse_secs(ENV_CONNECT_TIMEOUT, secs)?);
    }
    Ok(layer)
}

fn parse_secs(key: &str, value: &str) -> TabulaResult<u64> {
    value.trim().parse::<u64>().map_err(|_| {
        TabulaError::config_with_context(
            format!("expected a number of seconds, got '{}'", value),
            key.to_string(),
        )
    })
}

/// Load configuration from an optional file, the environment and overrides
pub fn load_config(
    config_file: Option<&Path>,
    overrides: HashMap<String, String>,
) -> TabulaResult<ClientConfig> {
    ConfigLoader::new()
        .with_defaults()
        .with_file(config_file.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE)))
        .with_env()
        .with_overrides(overrides)
        .load()
}
