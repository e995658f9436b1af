//! # Executor configuration.
//!
//! Provides [`Config`] centralized settings for the [`Executor`](crate::Executor).
//!
//! ## Sentinel values
//! - `bus_capacity = 0` → clamped to 1
//! - `breaker.timeout = 0s` → the breaker never cuts a task short
//! - `breaker.max_concurrent_requests = 0` → treated as 1

use crate::breaker::BreakerConfig;

/// Configuration for the executor runtime.
///
/// ## Field semantics
/// - `bus_capacity`: Event bus ring buffer size (min 1)
/// - `breaker`: Defaults for breaker commands that were never configured explicitly
///
/// Deadlines are not configured here: every submission names its own.
#[derive(Clone, Debug)]
pub struct Config {
    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Slow subscribers that lag behind more than `bus_capacity` messages skip older items.
    pub bus_capacity: usize,

    /// Breaker settings applied to unknown command names on first use.
    ///
    /// Override per command with [`BreakerRegistry::configure`](crate::BreakerRegistry::configure).
    pub breaker: BreakerConfig,
}

impl Config {
    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `bus_capacity = 1024`
    /// - `breaker = BreakerConfig::default()`
    fn default() -> Self {
        Self {
            bus_capacity: 1024,
            breaker: BreakerConfig::default(),
        }
    }
}
