//! # Run a single task on a detached tokio task.
//!
//! Producers are the only code that touches a task's future. Each one:
//!
//! - **Publishes** `TaskStarting`, then exactly one of `TaskStopped` / `TaskFailed`
//! - **Captures panics** and turns them into [`TaskError::Panicked`], so every producer
//!   delivers exactly one result
//! - **Stamps `elapsed`** when the task left it empty
//! - **Delivers** the result through a caller-supplied closure (`try_send` on a channel
//!   sized so it never blocks)
//!
//! ## Flow
//! ```text
//! spawn_detached(task, ctx, bus, deliver)
//!   └─► tokio::spawn (JoinHandle dropped: fire-and-forget)
//!         ├─► publish TaskStarting
//!         ├─► task.spawn(ctx).catch_unwind()
//!         ├─► publish TaskStopped / TaskFailed
//!         └─► deliver(result)
//! ```
//!
//! ## Rules
//! - Nobody joins or aborts a producer; a handle that stops waiting simply stops reading.
//! - The task receives the token it was given; honoring it is up to the task.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::{
    error::TaskError,
    events::{Bus, Event, EventKind},
    tasks::{Task, TaskRef, TaskResult},
};

/// Spawns `task` on a detached tokio task and hands its result to `deliver`.
///
/// Never blocks and never awaits; must be called inside a tokio runtime.
pub(crate) fn spawn_detached<T, D>(task: TaskRef<T>, ctx: CancellationToken, bus: Bus, deliver: D)
where
    T: Send + 'static,
    D: FnOnce(TaskResult<T>) + Send + 'static,
{
    tokio::spawn(async move {
        let res = run_once(task.as_ref(), ctx, &bus).await;
        deliver(res);
    });
}

/// Executes one run of `task`, publishing lifecycle events to `bus`.
pub(crate) async fn run_once<T>(
    task: &dyn Task<Output = T>,
    ctx: CancellationToken,
    bus: &Bus,
) -> TaskResult<T>
where
    T: Send + 'static,
{
    let started = Instant::now();
    bus.publish(Event::new(EventKind::TaskStarting).with_task(task.name()));

    let caught = AssertUnwindSafe(async move { task.spawn(ctx).await })
        .catch_unwind()
        .await;
    let mut res = match caught {
        Ok(res) => res,
        Err(panic_err) => TaskResult::err(TaskError::Panicked {
            reason: panic_message(&*panic_err),
        }),
    };
    let elapsed = *res.elapsed.get_or_insert(started.elapsed());

    match res.error() {
        None => publish_stopped(bus, task.name(), elapsed),
        Some(e) => publish_failed(bus, task.name(), elapsed, e),
    }
    res
}

/// Extracts a readable message from a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Publishes `TaskStopped` event (task produced a value).
fn publish_stopped(bus: &Bus, name: &str, elapsed: std::time::Duration) {
    bus.publish(
        Event::new(EventKind::TaskStopped)
            .with_task(name)
            .with_elapsed(elapsed),
    );
}

/// Publishes `TaskFailed` event with error details.
fn publish_failed(bus: &Bus, name: &str, elapsed: std::time::Duration, err: &TaskError) {
    bus.publish(
        Event::new(EventKind::TaskFailed)
            .with_task(name)
            .with_elapsed(elapsed)
            .with_reason(err.to_string()),
    );
}
