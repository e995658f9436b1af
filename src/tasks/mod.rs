//! # Task abstractions and outcomes.
//!
//! This module provides the task-related types:
//! - [`Task`] - trait for cancel-aware units of work producing a [`TaskResult`]
//! - [`TaskFn`] - async closure-backed task
//! - [`BlockingFn`] - blocking closure-backed task (runs on tokio's blocking pool)
//! - [`TaskRef`] - shared reference to a task (`Arc<dyn Task<Output = T>>`)
//! - [`TaskResult`] - outcome envelope (value or error, plus elapsed time)

mod blocking;
mod result;
mod task;
mod task_fn;

pub use blocking::BlockingFn;
pub use result::TaskResult;
pub use task::{BoxTaskFuture, Task, TaskRef};
pub use task_fn::TaskFn;
