//! # Circuit breaker adapter.
//!
//! An alternate submission strategy for single tasks: instead of running the task
//! straight away, the executor first asks a named [`Circuit`] for admission.
//!
//! ## Contents
//! - [`BreakerConfig`] per-command policy (timeout, concurrency cap, trip thresholds, sleep window)
//! - [`BreakerRegistry`] caller-owned map of command name → [`Circuit`]
//! - [`Circuit`], [`CircuitState`] the closed / open / half-open state machine
//!
//! ## Flow
//! ```text
//! Executor::run_breaker(task, "cmd", deadline, token)
//!   └─► registry.circuit("cmd")
//!   └─► spawn guard::run_guarded ──► Outcome (capacity-1 channel, same race as run_one)
//!         ├─► circuit.admit()      ── rejected ──► BreakerRejected { CircuitOpen | MaxConcurrency }
//!         ├─► spawn task (detached) + race against breaker timeout
//!         │        └─ timeout ──► cancel child token, BreakerRejected { Timeout }
//!         └─► circuit.report(sample) ──► BreakerOpened / BreakerClosed events
//! ```

mod circuit;
mod config;
pub(crate) mod guard;
mod metrics;
mod registry;

pub use circuit::{Circuit, CircuitState};
pub use config::BreakerConfig;
pub use registry::BreakerRegistry;
