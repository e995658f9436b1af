//! # Handles returned on submission.
//!
//! Every entry point of the [`Executor`](crate::Executor) returns a handle immediately;
//! the handle's `get().await` is the only place that waits.
//!
//! - [`Outcome`] — one task (also used by the breaker adapter)
//! - [`FirstOutcome`] — N tasks, the first delivered result wins
//! - [`AllOutcome`] — N tasks, per-index slots, partial results kept on timeout/cancel
//!
//! ## Resolution
//! ```text
//!            ┌── cancellation fired ──► Canceled
//! Pending ───┼── deadline elapsed  ───► Timeout { deadline }
//!            └── result(s) arrived ───► value / AllResults
//!                                            │
//!                                  memoized: Resolved (immutable)
//! ```
//!
//! ## Rules
//! - The race runs once, on the first `get`; later calls clone the memo without
//!   re-arming the deadline timer or touching the channel again.
//! - Ties are broken in a fixed order: cancellation, then deadline, then results.
//! - A zero deadline resolves to `Timeout` without waiting; an already-cancelled
//!   token resolves to `Canceled` even if a result is sitting in the channel.
//! - Tasks are never stopped by a handle. Results arriving after resolution are dropped.

mod all;
mod first;
mod race;
mod single;

pub use all::{AllOutcome, AllResults};
pub use first::FirstOutcome;
pub use single::Outcome;

pub(crate) use race::Waiter;
