//! Exponential backoff schedule for provider calls.

use std::time::Duration;

use crate::config::defaults;
use crate::errors::ProviderError;

/// Bounded retry with exponential backoff.
///
/// Only transient errors (`ProviderError::is_retryable`) are retried. The
/// caller's deadline still bounds the whole sequence of attempts.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub multiplier: f64,
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: defaults::DEFAULT_PROVIDER_MAX_RETRIES,
            initial_backoff: Duration::from_millis(defaults::DEFAULT_RETRY_INITIAL_BACKOFF_MS),
            multiplier: 2.0,
            max_backoff: Duration::from_millis(defaults::DEFAULT_RETRY_MAX_BACKOFF_MS),
        }
    }
}

impl RetryPolicy {
    /// No retries at all.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Delay before retry number `attempt` (0-based), capped at `max_backoff`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = self.multiplier.max(1.0).powi(attempt.min(32) as i32);
        let millis = self.initial_backoff.as_millis() as f64 * factor;
        let capped = millis.min(self.max_backoff.as_millis() as f64);
        Duration::from_millis(capped as u64)
    }

    /// Whether `error` after `attempt` failed attempts should be retried.
    pub fn should_retry(&self, error: &ProviderError, attempt: u32) -> bool {
        attempt < self.max_retries && error.is_retryable()
    }
}
