//! # taskrace
//!
//! **Taskrace** turns async or blocking units of work into non-blocking handles whose
//! results are collected later, under a deadline and under external cancellation.
//!
//! Handles resolve exactly once: whichever of {task completion, deadline, cancellation}
//! becomes observable first decides the outcome, and every later `get` returns the same
//! value. Groups of tasks compose into "first one wins" and "wait for all" handles, and
//! single tasks can be routed through a named circuit breaker.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │   TaskRef    │   │   TaskRef    │   │   TaskRef    │
//!     │(user task #1)│   │(user task #2)│   │(user task #3)│
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Executor                                                         │
//! │  - run_one / run_first / run_all / run_breaker                    │
//! │  - Bus (broadcast events)                                         │
//! │  - BreakerRegistry (named circuits)                               │
//! └──────┬──────────────────┬──────────────────┬──────────────────────┘
//!        ▼                  ▼                  ▼
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │   producer   │   │   producer   │   │   producer   │   detached tokio tasks,
//!     │ (run once)   │   │ (run once)   │   │ (run once)   │   panic-safe, try_send
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//!     ┌────────────────────────────────────────────────────┐
//!     │ bounded mpsc channel (cap 1 or cap N)              │
//!     └─────────────────────────┬──────────────────────────┘
//!                               ▼
//!     ┌────────────────────────────────────────────────────┐
//!     │ Outcome / FirstOutcome / AllOutcome                │
//!     │   get(): select! { cancel, deadline, result }      │
//!     │   memoized after the first resolution              │
//!     └────────────────────────────────────────────────────┘
//! ```
//!
//! ### Events
//! ```text
//! producers ─┐
//! handles   ─┼── publish(Event) ──► Bus ──► subscriber_listener ──► SubscriberSet
//! breakers  ─┘                                                    ┌──────┼──────┐
//!                                                                 ▼      ▼      ▼
//!                                                              sub1    sub2   subN
//! ```
//!
//! ## Features
//! | Area              | Description                                                        | Key types / traits                                  |
//! |-------------------|--------------------------------------------------------------------|-----------------------------------------------------|
//! | **Tasks**         | Define tasks as async or blocking closures.                        | [`Task`], [`TaskFn`], [`BlockingFn`], [`TaskRef`]   |
//! | **Handles**       | Race completion vs. deadline vs. cancellation, memoized.           | [`Outcome`], [`FirstOutcome`], [`AllOutcome`]       |
//! | **Breaker**       | Concurrency cap, error-rate tripping, sleep window per command.    | [`BreakerRegistry`], [`Circuit`], [`BreakerConfig`] |
//! | **Subscriber API**| Hook into lifecycle events (logging, metrics, custom subscribers). | [`Subscribe`]                                       |
//! | **Errors**        | Every failure is a value inside the outcome.                       | [`TaskError`], [`BreakerReason`]                    |
//! | **Configuration** | Centralize runtime settings.                                       | [`Config`]                                          |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//! use taskrace::{Config, Executor, TaskFn, TaskRef, TaskResult};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     // Build subscribers (optional)
//!     #[cfg(feature = "logging")]
//!     let subs: Vec<Arc<dyn taskrace::Subscribe>> = vec![Arc::new(taskrace::LogWriter::default())];
//!     #[cfg(not(feature = "logging"))]
//!     let subs: Vec<Arc<dyn taskrace::Subscribe>> = Vec::new();
//!
//!     let exec = Executor::builder(Config::default())
//!         .with_subscribers(subs)
//!         .build();
//!
//!     let slow: TaskRef<u32> = TaskFn::arc("slow", |_ctx: CancellationToken| async {
//!         tokio::time::sleep(Duration::from_millis(200)).await;
//!         TaskResult::ok(1u32)
//!     });
//!     let fast: TaskRef<u32> = TaskFn::arc("fast", |_ctx: CancellationToken| async {
//!         tokio::time::sleep(Duration::from_millis(20)).await;
//!         TaskResult::ok(2u32)
//!     });
//!
//!     let token = CancellationToken::new();
//!     let mut first = exec.run_first(vec![slow, fast], Duration::from_secs(1), &token);
//!     assert_eq!(first.get().await.value(), Some(&2));
//!
//!     exec.shutdown().await;
//! }
//! ```
mod breaker;
mod core;
mod error;
mod events;
mod outcome;
mod subscribers;
mod tasks;

// ---- Public re-exports ----

pub use breaker::{BreakerConfig, BreakerRegistry, Circuit, CircuitState};
pub use core::{Config, Executor, ExecutorBuilder};
pub use error::{BreakerReason, TaskError};
pub use events::{Bus, Event, EventKind};
pub use outcome::{AllOutcome, AllResults, FirstOutcome, Outcome};
pub use subscribers::Subscribe;
pub use tasks::{BlockingFn, BoxTaskFuture, Task, TaskFn, TaskRef, TaskResult};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
