//! # Outcome envelope of a single task.
//!
//! [`TaskResult`] pairs the task's `Result` with an optional elapsed time.
//! A value exists only when there is no error; encoding this as `Result` makes
//! the "value xor error" rule impossible to break.
//!
//! `elapsed` is advisory telemetry. Tasks may fill it themselves; otherwise the
//! runtime stamps the wall time the task took. Nothing in the crate makes decisions on it.

use std::time::Duration;

use crate::error::TaskError;

/// Result of one task execution, as seen by a handle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskResult<T> {
    /// Value on success, error otherwise.
    pub outcome: Result<T, TaskError>,
    /// Time the task took, if known.
    pub elapsed: Option<Duration>,
}

impl<T> TaskResult<T> {
    /// Successful result carrying `value`.
    pub fn ok(value: T) -> Self {
        Self {
            outcome: Ok(value),
            elapsed: None,
        }
    }

    /// Failed result carrying `error`.
    pub fn err(error: TaskError) -> Self {
        Self {
            outcome: Err(error),
            elapsed: None,
        }
    }

    /// Failed result with a task-defined message ([`TaskError::Fail`]).
    pub fn fail(error: impl Into<String>) -> Self {
        Self::err(TaskError::Fail {
            error: error.into(),
        })
    }

    /// Returns the result with `elapsed` set.
    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = Some(elapsed);
        self
    }

    /// Borrowed value, if the task succeeded.
    pub fn value(&self) -> Option<&T> {
        self.outcome.as_ref().ok()
    }

    /// Borrowed error, if the task did not succeed.
    pub fn error(&self) -> Option<&TaskError> {
        self.outcome.as_ref().err()
    }

    /// True if the result carries a value.
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Consumes the result and returns the value, if any.
    pub fn into_value(self) -> Option<T> {
        self.outcome.ok()
    }
}

impl<T> From<Result<T, TaskError>> for TaskResult<T> {
    fn from(outcome: Result<T, TaskError>) -> Self {
        Self {
            outcome,
            elapsed: None,
        }
    }
}
