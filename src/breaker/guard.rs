//! # Breaker-guarded execution.
//!
//! [`run_guarded`] is the producer behind [`Executor::run_breaker`](crate::Executor::run_breaker):
//! it asks the circuit for admission, runs the task under the breaker timeout and
//! feeds the outcome back into the circuit.
//!
//! ## Accounting
//! | outcome                               | recorded as |
//! |---------------------------------------|-------------|
//! | value                                 | success     |
//! | `Fail`, `Panicked`, breaker timeout   | failure     |
//! | `MaxConcurrency`                      | rejection   |
//! | `CircuitOpen`                         | nothing     |
//! | task returned `Canceled`              | nothing     |

use std::sync::Arc;

use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;

use super::circuit::{Circuit, Transition};
use super::metrics::Sample;
use crate::{
    core::runner::run_once,
    error::{BreakerReason, TaskError},
    events::{Bus, Event, EventKind},
    tasks::{TaskRef, TaskResult},
};

/// Runs `task` through `circuit` and returns the result to deliver to the handle.
///
/// `ctx` must be a token owned by this execution: it is cancelled when the breaker
/// timeout fires.
pub(crate) async fn run_guarded<T>(
    circuit: Arc<Circuit>,
    task: TaskRef<T>,
    ctx: CancellationToken,
    bus: Bus,
) -> TaskResult<T>
where
    T: Send + 'static,
{
    let admission = match circuit.admit().await {
        Ok(a) => a,
        Err(reason) => {
            if reason == BreakerReason::MaxConcurrency {
                let change = circuit.report(false, Some(Sample::Rejection)).await;
                publish_transition(&bus, &circuit, change);
            }
            publish_rejected(&bus, &circuit, reason);
            return TaskResult::err(TaskError::BreakerRejected { reason });
        }
    };

    let started = Instant::now();
    let handle = {
        let (task, ctx, bus) = (Arc::clone(&task), ctx.clone(), bus.clone());
        tokio::spawn(async move { run_once(task.as_ref(), ctx, &bus).await })
    };

    let joined = match circuit.config().execution_timeout() {
        Some(limit) => time::timeout(limit, handle).await.ok(),
        None => Some(handle.await),
    };

    let res = match joined {
        Some(Ok(res)) => res,
        Some(Err(join_err)) => TaskResult::err(TaskError::Panicked {
            reason: join_err.to_string(),
        }),
        None => {
            ctx.cancel();
            publish_rejected(&bus, &circuit, BreakerReason::Timeout);
            TaskResult::err(TaskError::BreakerRejected {
                reason: BreakerReason::Timeout,
            })
            .with_elapsed(started.elapsed())
        }
    };

    let trial = admission.is_trial();
    drop(admission);
    let change = circuit.report(trial, sample_of(&res)).await;
    publish_transition(&bus, &circuit, change);
    res
}

fn sample_of<T>(res: &TaskResult<T>) -> Option<Sample> {
    match res.error() {
        None => Some(Sample::Success),
        Some(TaskError::Canceled) => None,
        Some(_) => Some(Sample::Failure),
    }
}

fn publish_rejected(bus: &Bus, circuit: &Circuit, reason: BreakerReason) {
    bus.publish(
        Event::new(EventKind::BreakerRejected)
            .with_task(circuit.label())
            .with_reason(reason.as_label()),
    );
}

fn publish_transition(bus: &Bus, circuit: &Circuit, change: Option<Transition>) {
    let kind = match change {
        Some(Transition::Opened) => EventKind::BreakerOpened,
        Some(Transition::Closed) => EventKind::BreakerClosed,
        None => return,
    };
    bus.publish(Event::new(kind).with_task(circuit.label()));
}
