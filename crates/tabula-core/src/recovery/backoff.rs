//! Backoff strategies for retry operations

use std::time::Duration;

/// Configuration for backoff behavior
#[derive(Debug, Clone)]
pub struct BackoffConfig {
    /// Initial delay before first retry
    pub initial_delay: Duration,
    /// Maximum delay between retries
    pub max_delay: Duration,
    /// Multiplier for exponential backoff
    pub multiplier: f64,
    /// Add random jitter to prevent thundering herd
    pub jitter: bool,
    /// Maximum jitter ratio (0.0 - 1.0)
    pub jitter_ratio: f64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(5),
            multiplier: 2.0,
            jitter: true,
            jitter_ratio: 0.2,
        }
    }
}

impl BackoffConfig {
    /// Create a new backoff config with custom initial delay
    pub fn with_initial_delay(initial_delay: Duration) -> Self {
        Self {
            initial_delay,
            ..Default::default()
        }
    }

    /// Set the maximum delay
    pub fn max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Enable or disable jitter
    pub fn jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }
}

/// Exponential backoff
#[derive(Debug, Clone)]
pub struct ExponentialBackoff {
    config: BackoffConfig,
    attempt: u32,
}

impl ExponentialBackoff {
    /// Create a new exponential backoff with custom config
    pub fn with_config(config: BackoffConfig) -> Self {
        Self { config, attempt: 0 }
    }

    /// Get the next delay and advance the attempt counter
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.delay_for_attempt(self.attempt);
        self.attempt += 1;
        delay
    }

    /// Get the delay for the given attempt number (0-indexed)
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base_delay =
            self.config.initial_delay.as_secs_f64() * self.config.multiplier.powi(attempt as i32);
        let capped =
            Duration::from_secs_f64(base_delay.min(self.config.max_delay.as_secs_f64()));
        self.add_jitter(capped)
    }

    fn add_jitter(&self, delay: Duration) -> Duration {
        if !self.config.jitter {
            return delay;
        }

        let jitter_range = delay.as_secs_f64() * self.config.jitter_ratio;
        let jittered = delay.as_secs_f64() + rand_jitter(jitter_range);

        Duration::from_secs_f64(jittered.max(0.0))
    }
}

impl Default for ExponentialBackoff {
    fn default() -> Self {
        Self::with_config(BackoffConfig::default())
    }
}

fn rand_jitter(range: f64) -> f64 {
    use std::time::SystemTime;

    let nanos = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);

    // Simple hash-based pseudo-random
    let hash = nanos.wrapping_mul(2654435761);
    let normalized = (hash as f64) / (u32::MAX as f64);

    normalized * range
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_growth_without_jitter() {
        let config = BackoffConfig::with_initial_delay(Duration::from_millis(100))
            .max_delay(Duration::from_secs(10))
            .jitter(false);
        let mut backoff = ExponentialBackoff::with_config(config);

        assert_eq!(backoff.next_delay(), Duration::from_millis(100));
        assert_eq!(backoff.next_delay(), Duration::from_millis(200));
        assert_eq!(backoff.next_delay(), Duration::from_millis(400));
    }

    #[test]
    fn test_delay_is_capped() {
        let config = BackoffConfig::with_initial_delay(Duration::from_secs(1))
            .max_delay(Duration::from_secs(3))
            .jitter(false);
        let backoff = ExponentialBackoff::with_config(config);

        assert_eq!(backoff.delay_for_attempt(10), Duration::from_secs(3));
    }

    #[test]
    fn test_jitter_stays_in_range() {
        let config = BackoffConfig::with_initial_delay(Duration::from_millis(100));
        let backoff = ExponentialBackoff::with_config(config);

        let delay = backoff.delay_for_attempt(0);
        assert!(delay >= Duration::from_millis(100));
        assert!(delay <= Duration::from_millis(121));
    }
}
