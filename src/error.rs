//! Error types carried inside task outcomes.
//!
//! This module defines two enums:
//!
//! - [`TaskError`] — why a [`TaskResult`](crate::TaskResult) holds no value.
//! - [`BreakerReason`] — why the circuit breaker refused or cut short an execution.
//!
//! Errors are plain values: handles never panic or return `Err` from their accessors,
//! every failure is represented inside the returned outcome. Both types provide
//! `as_label` for logs/metrics, [`TaskError`] additionally provides `as_message`.

use std::time::Duration;
use thiserror::Error;

/// # Reasons for a breaker-level failure.
///
/// Produced only by [`Executor::run_breaker`](crate::Executor::run_breaker).
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakerReason {
    /// The circuit is open (or a half-open trial is already in flight).
    #[error("circuit open")]
    CircuitOpen,

    /// All concurrency permits of the circuit are taken.
    #[error("max concurrency reached")]
    MaxConcurrency,

    /// The breaker's own execution timeout fired before the task finished.
    #[error("breaker timeout")]
    Timeout,
}

impl BreakerReason {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            BreakerReason::CircuitOpen => "circuit_open",
            BreakerReason::MaxConcurrency => "max_concurrency",
            BreakerReason::Timeout => "breaker_timeout",
        }
    }
}

/// # Errors observed by a handle.
///
/// `Timeout` and `Canceled` are added by the handles themselves when the task did not
/// finish in time. `Fail` and `Panicked` come from the task, `BreakerRejected` from the
/// breaker adapter. Domain errors are never rewrapped or retried.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// The deadline elapsed before the handle resolved.
    #[error("timed out after {deadline:?}")]
    Timeout {
        /// The deadline that was exceeded.
        deadline: Duration,
    },

    /// The cancellation token fired before the handle resolved.
    #[error("context cancelled")]
    Canceled,

    /// The circuit breaker refused to run the task or cut it short.
    #[error("rejected by breaker: {reason}")]
    BreakerRejected {
        /// What the breaker objected to.
        reason: BreakerReason,
    },

    /// Task-defined failure, propagated verbatim.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// The task panicked; the panic payload is kept as text.
    #[error("task panicked: {reason}")]
    Panicked {
        /// Panic message, or `"unknown panic"` for non-string payloads.
        reason: String,
    },
}

impl TaskError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use taskrace::TaskError;
    /// use std::time::Duration;
    ///
    /// let err = TaskError::Timeout { deadline: Duration::from_secs(1) };
    /// assert_eq!(err.as_label(), "task_timeout");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            TaskError::Timeout { .. } => "task_timeout",
            TaskError::Canceled => "task_canceled",
            TaskError::BreakerRejected { .. } => "task_breaker_rejected",
            TaskError::Fail { .. } => "task_failed",
            TaskError::Panicked { .. } => "task_panicked",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            TaskError::Timeout { deadline } => format!("timeout: {deadline:?}"),
            TaskError::Canceled => "context cancelled".to_string(),
            TaskError::BreakerRejected { reason } => format!("breaker: {}", reason.as_label()),
            TaskError::Fail { error } => format!("error: {error}"),
            TaskError::Panicked { reason } => format!("panic: {reason}"),
        }
    }

    /// True for [`TaskError::Timeout`].
    pub fn is_timeout(&self) -> bool {
        matches!(self, TaskError::Timeout { .. })
    }

    /// True for [`TaskError::Canceled`].
    pub fn is_canceled(&self) -> bool {
        matches!(self, TaskError::Canceled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        assert_eq!(TaskError::Canceled.as_label(), "task_canceled");
        assert_eq!(
            TaskError::BreakerRejected {
                reason: BreakerReason::MaxConcurrency
            }
            .as_label(),
            "task_breaker_rejected"
        );
        assert_eq!(BreakerReason::CircuitOpen.as_label(), "circuit_open");
    }

    #[test]
    fn display_includes_details() {
        let err = TaskError::Fail {
            error: "boom".into(),
        };
        assert_eq!(err.to_string(), "execution failed: boom");

        let err = TaskError::BreakerRejected {
            reason: BreakerReason::Timeout,
        };
        assert_eq!(err.to_string(), "rejected by breaker: breaker timeout");
        assert_eq!(err.as_message(), "breaker: breaker_timeout");
    }

    #[test]
    fn predicates_match_variants() {
        assert!(TaskError::Canceled.is_canceled());
        assert!(!TaskError::Canceled.is_timeout());
        assert!(
            TaskError::Timeout {
                deadline: Duration::from_millis(5)
            }
            .is_timeout()
        );
    }
}
