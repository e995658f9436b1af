//! # Event subscribers.
//!
//! This module provides the [`Subscribe`] trait and the internal fan-out the
//! [`Executor`](crate::Executor) uses to deliver runtime events to subscribers.
//!
//! ## Architecture
//! ```text
//! producers / handles / breakers ── publish(Event) ──► Bus ──► subscriber_listener
//!                                                                   │
//!                                                            SubscriberSet::emit
//!                                                        ┌──────────┼──────────┐
//!                                                        ▼          ▼          ▼
//!                                                    LogWriter   Metrics    Custom
//! ```
//!
//! ## Implementing custom subscribers
//! ```no_run
//! use taskrace::{Subscribe, Event, EventKind};
//! use async_trait::async_trait;
//!
//! struct TimeoutCounter;
//!
//! #[async_trait]
//! impl Subscribe for TimeoutCounter {
//!     async fn on_event(&self, event: &Event) {
//!         if event.kind == EventKind::TimeoutHit {
//!             // increment counter
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "timeout-counter" }
//! }
//! ```

#[cfg(feature = "logging")]
mod log;
mod set;
mod subscribe;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub(crate) use set::SubscriberSet;
pub use subscribe::Subscribe;
