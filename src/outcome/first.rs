//! # Any-of handle.
//!
//! [`FirstOutcome`] is returned by [`Executor::run_first`](crate::Executor::run_first).
//! All producers share one channel sized to the task count, so every task can deliver
//! without blocking regardless of consumption order. The first delivered result wins;
//! losers keep running and their results are dropped.
//!
//! With zero tasks only the deadline or cancellation can resolve the handle.

use std::time::Duration;

use super::race::Waiter;
use crate::tasks::TaskResult;

/// Handle to a group of tasks where the first result wins.
pub struct FirstOutcome<T> {
    waiter: Waiter<T>,
    resolved: Option<TaskResult<T>>,
}

impl<T> FirstOutcome<T> {
    pub(crate) fn new(waiter: Waiter<T>) -> Self {
        Self {
            waiter,
            resolved: None,
        }
    }

    /// Label of the group, e.g. `first[a,b,c]`.
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

impl<T: Clone> FirstOutcome<T> {
    /// Waits for the first delivered result, the deadline, or cancellation.
    ///
    /// The winning result is returned verbatim, including a task's own error.
    /// Memoized like [`Outcome::get`](crate::Outcome::get).
    pub async fn get(&mut self) -> TaskResult<T> {
        if let Some(done) = &self.resolved {
            return done.clone();
        }
        let res = self.waiter.race().await;
        self.resolved = Some(res.clone());
        res
    }
}
