//! # Task abstraction.
//!
//! A [`Task`] has a stable [`name`](Task::name) and a [`spawn`](Task::spawn) method that
//! creates a fresh future from a [`CancellationToken`]. The common handle type is
//! [`TaskRef`], an `Arc<dyn Task<Output = T>>` that can be shared across handles.
//!
//! Cancellation is cooperative: tasks receive the token and *may* poll it. Handles never
//! stop a task; when a handle gives up (deadline, cancellation) the task keeps running and
//! its result is discarded.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::tasks::result::TaskResult;

/// Boxed future returned by [`Task::spawn`].
pub type BoxTaskFuture<T> = Pin<Box<dyn Future<Output = TaskResult<T>> + Send + 'static>>;

/// Shared handle to a task.
pub type TaskRef<T> = Arc<dyn Task<Output = T>>;

/// # Cancel-aware unit of work.
///
/// # Example
/// ```
/// use tokio_util::sync::CancellationToken;
/// use taskrace::{BoxTaskFuture, Task, TaskResult};
///
/// struct Ping;
///
/// impl Task for Ping {
///     type Output = &'static str;
///
///     fn name(&self) -> &str { "ping" }
///
///     fn spawn(&self, ctx: CancellationToken) -> BoxTaskFuture<&'static str> {
///         Box::pin(async move {
///             if ctx.is_cancelled() {
///                 return TaskResult::fail("gave up");
///             }
///             TaskResult::ok("pong")
///         })
///     }
/// }
/// ```
pub trait Task: Send + Sync + 'static {
    /// Value produced on success.
    type Output: Send + 'static;

    /// Returns a stable, human-readable task name.
    fn name(&self) -> &str;

    /// Creates a new future for one execution.
    ///
    /// Each call must produce an independent future owning its own state.
    fn spawn(&self, ctx: CancellationToken) -> BoxTaskFuture<Self::Output>;
}
