//! Client configuration
//!
//! Configuration is assembled from ordered sources (defaults, a JSON file,
//! environment variables, explicit overrides) and validated once loaded.

pub mod loader;
pub mod model;
pub mod timeouts;

pub use loader::{ConfigLoader, ConfigSource, DEFAULT_CONFIG_FILE, load_config};
pub use model::{ClientConfig, ConfigLayer, TimeoutConfig, TimeoutLayer};
