//! # Single-task handle.
//!
//! [`Outcome`] is returned by [`Executor::run_one`](crate::Executor::run_one) and
//! [`Executor::run_breaker`](crate::Executor::run_breaker). Its producer writes one
//! [`TaskResult`] into a capacity-1 channel, so it never blocks even if nobody is
//! waiting yet.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//! use taskrace::{Config, Executor, TaskFn, TaskRef, TaskResult};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let exec = Executor::new(Config::default());
//!     let hello: TaskRef<&'static str> = TaskFn::arc("hello", |_ctx: CancellationToken| async {
//!         TaskResult::ok("OK")
//!     });
//!
//!     let mut handle = exec.run_one(hello, Duration::from_secs(1), &CancellationToken::new());
//!     let res = handle.get().await;
//!     assert_eq!(res.value(), Some(&"OK"));
//! }
//! ```

use std::time::Duration;

use super::race::Waiter;
use crate::tasks::TaskResult;

/// Handle to one submitted task.
pub struct Outcome<T> {
    waiter: Waiter<T>,
    resolved: Option<TaskResult<T>>,
}

impl<T> Outcome<T> {
    pub(crate) fn new(waiter: Waiter<T>) -> Self {
        Self {
            waiter,
            resolved: None,
        }
    }

    /// Task (or breaker command) name this handle waits on.
    pub fn name(&self) -> &str {
        self.waiter.label()
    }

    /// Deadline measured from the first `get` call.
    pub fn deadline(&self) -> Duration {
        self.waiter.deadline()
    }

    /// True once `get` has produced a result.
    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }

    /// The memoized result, if already resolved. Never waits.
    pub fn peek(&self) -> Option<&TaskResult<T>> {
        self.resolved.as_ref()
    }
}

impl<T: Clone> Outcome<T> {
    /// Waits for the task result, the deadline, or cancellation, whichever comes first.
    ///
    /// The first call runs the race and memoizes its result; later calls return a
    /// clone of it immediately.
    pub async fn get(&mut self) -> TaskResult<T> {
        if let Some(done) = &self.resolved {
            return done.clone();
        }
        let res = self.waiter.race().await;
        self.resolved = Some(res.clone());
        res
    }
}
