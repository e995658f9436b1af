//! # Circuit state machine.
//!
//! A [`Circuit`] guards one named command. It owns the concurrency permits, the
//! rolling health window and the closed / open / half-open state.
//!
//! ## Transitions
//! ```text
//!            errors ≥ threshold && volume ≥ threshold
//!   Closed ─────────────────────────────────────────► Open
//!     ▲                                                │ sleep window elapsed
//!     │ trial succeeded                                ▼
//!     └──────────────────────────────────────────── HalfOpen (one trial)
//!                          trial failed ──► Open (sleep window restarts)
//! ```
//!
//! ## Rules
//! - Open rejects with [`BreakerReason::CircuitOpen`]; short-circuits are not recorded.
//! - HalfOpen admits exactly one trial; concurrent callers see `CircuitOpen`.
//! - No free permit → [`BreakerReason::MaxConcurrency`], recorded as a rejection.
//! - A trial that ends neutrally (the caller cancelled it) hands the trial slot back.

use std::sync::Arc;

use tokio::sync::{Mutex, OwnedSemaphorePermit, Semaphore};
use tokio::time::Instant;

use super::config::BreakerConfig;
use super::metrics::{RollingWindow, Sample};
use crate::error::BreakerReason;

/// Observable state of a [`Circuit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CircuitState {
    /// Requests flow; health is tracked.
    Closed,
    /// Requests are rejected until the sleep window elapses.
    Open,
    /// One trial request decides whether to close or re-open.
    HalfOpen,
}

impl CircuitState {
    /// Returns a short stable label for logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            CircuitState::Closed => "closed",
            CircuitState::Open => "open",
            CircuitState::HalfOpen => "half_open",
        }
    }
}

/// State change produced by [`Circuit::report`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Transition {
    Opened,
    Closed,
}

/// Ticket for one admitted execution. Dropping it returns the permit.
#[derive(Debug)]
pub(crate) struct Admission {
    _permit: OwnedSemaphorePermit,
    trial: bool,
}

impl Admission {
    pub(crate) fn is_trial(&self) -> bool {
        self.trial
    }
}

struct Inner {
    state: CircuitState,
    opened_at: Option<Instant>,
    trial_in_flight: bool,
    window: RollingWindow,
}

/// Breaker for one named command.
pub struct Circuit {
    name: Arc<str>,
    cfg: BreakerConfig,
    permits: Arc<Semaphore>,
    inner: Mutex<Inner>,
}

impl Circuit {
    pub(crate) fn new(name: impl Into<Arc<str>>, cfg: BreakerConfig) -> Self {
        let permits = Arc::new(Semaphore::new(cfg.concurrency_limit()));
        Self {
            name: name.into(),
            cfg,
            permits,
            inner: Mutex::new(Inner {
                state: CircuitState::Closed,
                opened_at: None,
                trial_in_flight: false,
                window: RollingWindow::new(),
            }),
        }
    }

    /// Command name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn label(&self) -> Arc<str> {
        Arc::clone(&self.name)
    }

    /// Policy this circuit was built with.
    pub fn config(&self) -> &BreakerConfig {
        &self.cfg
    }

    /// Current state. An open circuit whose sleep window has passed still reads
    /// `Open` until the next request turns it half-open.
    pub async fn state(&self) -> CircuitState {
        self.inner.lock().await.state
    }

    /// Permits currently free.
    pub fn available_permits(&self) -> usize {
        self.permits.available_permits()
    }

    /// Asks for permission to run one execution.
    pub(crate) async fn admit(&self) -> Result<Admission, BreakerReason> {
        let mut inner = self.inner.lock().await;
        let now = Instant::now();

        match inner.state {
            CircuitState::Closed => {}
            CircuitState::Open => {
                let reopen_at = inner.opened_at.map(|at| at + self.cfg.sleep_window);
                if reopen_at.is_some_and(|at| now < at) {
                    return Err(BreakerReason::CircuitOpen);
                }
                inner.state = CircuitState::HalfOpen;
                inner.trial_in_flight = false;
            }
            CircuitState::HalfOpen => {
                if inner.trial_in_flight {
                    return Err(BreakerReason::CircuitOpen);
                }
            }
        }

        let permit = Arc::clone(&self.permits)
            .try_acquire_owned()
            .map_err(|_| BreakerReason::MaxConcurrency)?;

        let trial = inner.state == CircuitState::HalfOpen;
        if trial {
            inner.trial_in_flight = true;
        }
        Ok(Admission {
            _permit: permit,
            trial,
        })
    }

    /// Feeds one observation back and returns the resulting state change, if any.
    ///
    /// `None` is a neutral outcome: nothing is recorded, but a trial slot is released.
    pub(crate) async fn report(&self, trial: bool, sample: Option<Sample>) -> Option<Transition> {
        let mut inner = self.inner.lock().await;
        let now = Instant::now();

        if trial {
            inner.trial_in_flight = false;
            return match sample {
                None => None,
                Some(Sample::Success) => {
                    inner.state = CircuitState::Closed;
                    inner.opened_at = None;
                    inner.window.reset();
                    Some(Transition::Closed)
                }
                Some(_) => {
                    inner.state = CircuitState::Open;
                    inner.opened_at = Some(now);
                    Some(Transition::Opened)
                }
            };
        }

        let sample = sample?;
        inner.window.record(now, sample);
        if inner.state != CircuitState::Closed {
            return None;
        }

        let health = inner.window.health(now);
        let tripped = health.requests >= self.cfg.request_volume_threshold
            && health.error_percent() >= u64::from(self.cfg.error_percent_threshold);
        if tripped {
            inner.state = CircuitState::Open;
            inner.opened_at = Some(now);
            Some(Transition::Opened)
        } else {
            None
        }
    }
}

impl std::fmt::Debug for Circuit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Circuit")
            .field("name", &self.name)
            .field("cfg", &self.cfg)
            .finish_non_exhaustive()
    }
}
