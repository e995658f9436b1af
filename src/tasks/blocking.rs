//! # Blocking closure-backed task (`BlockingFn`)
//!
//! [`BlockingFn`] adapts a synchronous `Fn(CancellationToken) -> TaskResult<T>` into a
//! [`Task`] by running it on tokio's blocking thread pool. Use it for CPU-bound or
//! blocking-I/O work that must not stall the async workers.
//!
//! A blocking closure cannot be interrupted; it may check `ctx.is_cancelled()`
//! between steps to bail out early.

use std::borrow::Cow;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::error::TaskError;
use crate::tasks::result::TaskResult;
use crate::tasks::task::{BoxTaskFuture, Task};

/// Blocking function-backed task.
#[derive(Debug)]
pub struct BlockingFn<F> {
    name: Cow<'static, str>,
    f: Arc<F>,
}

impl<F> BlockingFn<F> {
    /// Creates a new blocking task.
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f: Arc::new(f),
        }
    }

    /// Creates the task and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

impl<F, T> Task for BlockingFn<F>
where
    F: Fn(CancellationToken) -> TaskResult<T> + Send + Sync + 'static,
    T: Send + 'static,
{
    type Output = T;

    fn name(&self) -> &str {
        &self.name
    }

    fn spawn(&self, ctx: CancellationToken) -> BoxTaskFuture<T> {
        let f = Arc::clone(&self.f);
        Box::pin(async move {
            match tokio::task::spawn_blocking(move || f(ctx)).await {
                Ok(res) => res,
                Err(e) => TaskResult::err(TaskError::Panicked {
                    reason: e.to_string(),
                }),
            }
        })
    }
}
