//! Retry support for transient network failures
//!
//! - Backoff timing between attempts
//! - Retry configuration loaded alongside the client config

pub mod backoff;
pub mod retry;

pub use backoff::{BackoffConfig, ExponentialBackoff};
pub use retry::RetryConfig;
