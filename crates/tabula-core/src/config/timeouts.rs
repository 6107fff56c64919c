//! Default timeout values for network operations

use std::time::Duration;

/// Default connection timeout (10 seconds)
pub const CONNECTION_SECS: u64 = 10;

/// Default request timeout (30 seconds)
pub const REQUEST_SECS: u64 = 30;

/// Get connection timeout as Duration
pub fn connection_timeout() -> Duration {
    Duration::from_secs(CONNECTION_SECS)
}

/// Get request timeout as Duration
pub fn request_timeout() -> Duration {
    Duration::from_secs(REQUEST_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeouts() {
        assert_eq!(connection_timeout(), Duration::from_secs(10));
        assert_eq!(request_timeout(), Duration::from_secs(30));
    }
}
