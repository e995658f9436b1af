//! # Breaker policy configuration.
//!
//! [`BreakerConfig`] describes how one named command is protected.
//!
//! ## Sentinel values
//! - `timeout = 0s` → no breaker timeout (only the handle deadline applies)
//! - `max_concurrent_requests = 0` → treated as 1

use std::time::Duration;

/// Policy for one breaker command.
///
/// ## Field semantics
/// - `timeout`: longest a single execution may run before the breaker reports it as failed
/// - `max_concurrent_requests`: executions allowed in flight at once
/// - `request_volume_threshold`: minimum requests in the rolling window before the circuit may trip
/// - `error_percent_threshold`: error percentage (0..=100) at or above which the circuit trips
/// - `sleep_window`: how long an open circuit rejects before admitting one trial request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BreakerConfig {
    /// Breaker execution timeout.
    pub timeout: Duration,
    /// Concurrency cap for the command.
    pub max_concurrent_requests: usize,
    /// Minimum rolling-window volume before tripping is considered.
    pub request_volume_threshold: u64,
    /// Error percentage that trips the circuit.
    pub error_percent_threshold: u8,
    /// Time an open circuit waits before a half-open trial.
    pub sleep_window: Duration,
}

impl BreakerConfig {
    /// Returns the breaker timeout as an `Option` (`None` for `0s`).
    #[inline]
    pub fn execution_timeout(&self) -> Option<Duration> {
        if self.timeout == Duration::ZERO {
            None
        } else {
            Some(self.timeout)
        }
    }

    /// Returns the concurrency cap clamped to a minimum of 1.
    #[inline]
    pub fn concurrency_limit(&self) -> usize {
        self.max_concurrent_requests.max(1)
    }
}

impl Default for BreakerConfig {
    /// Default policy:
    ///
    /// - `timeout = 1s`
    /// - `max_concurrent_requests = 10`
    /// - `request_volume_threshold = 20`
    /// - `error_percent_threshold = 50`
    /// - `sleep_window = 5s`
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(1),
            max_concurrent_requests: 10,
            request_volume_threshold: 20,
            error_percent_threshold: 50,
            sleep_window: Duration::from_secs(5),
        }
    }
}
