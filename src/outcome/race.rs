//! Shared racing primitives for all handle types.

use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{self, Sleep};
use tokio_util::sync::CancellationToken;

use crate::{
    error::TaskError,
    events::{Bus, Event, EventKind},
    tasks::TaskResult,
};

/// What ended one wait cycle.
pub(super) enum Signal<M> {
    Message(M),
    Deadline,
    Canceled,
}

/// Resolves without waiting when the token already fired or the deadline is zero.
pub(super) fn settled(deadline: Duration, token: &CancellationToken) -> Option<TaskError> {
    if token.is_cancelled() {
        Some(TaskError::Canceled)
    } else if deadline.is_zero() {
        Some(TaskError::Timeout { deadline })
    } else {
        None
    }
}

/// Waits for the next message unless cancellation or the deadline comes first.
///
/// A closed channel disables the message branch, leaving the deadline and the
/// token to decide.
pub(super) async fn next<M>(
    rx: &mut mpsc::Receiver<M>,
    sleep: Pin<&mut Sleep>,
    token: &CancellationToken,
) -> Signal<M> {
    tokio::select! {
        biased;
        _ = token.cancelled() => Signal::Canceled,
        _ = sleep => Signal::Deadline,
        Some(msg) = rx.recv() => Signal::Message(msg),
    }
}

/// Publishes `TimeoutHit` / `WaitCanceled` for a handle that stopped waiting.
pub(super) fn report_interrupted(bus: &Bus, label: &Arc<str>, err: &TaskError) {
    match err {
        TaskError::Timeout { deadline } => bus.publish(
            Event::new(EventKind::TimeoutHit)
                .with_task(Arc::clone(label))
                .with_deadline(*deadline),
        ),
        TaskError::Canceled => {
            bus.publish(Event::new(EventKind::WaitCanceled).with_task(Arc::clone(label)))
        }
        _ => {}
    }
}

/// Receiving side of a single-value race (one or many producers, first result wins).
pub(crate) struct Waiter<T> {
    label: Arc<str>,
    rx: mpsc::Receiver<TaskResult<T>>,
    deadline: Duration,
    sleep: Option<Pin<Box<Sleep>>>,
    token: CancellationToken,
    bus: Bus,
}

impl<T> Waiter<T> {
    pub(crate) fn new(
        label: impl Into<Arc<str>>,
        rx: mpsc::Receiver<TaskResult<T>>,
        deadline: Duration,
        token: CancellationToken,
        bus: Bus,
    ) -> Self {
        Self {
            label: label.into(),
            rx,
            deadline,
            sleep: None,
            token,
            bus,
        }
    }

    pub(super) fn label(&self) -> &str {
        &self.label
    }

    pub(super) fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Runs the race once. Closes the channel afterwards so late producers drop their results.
    ///
    /// The deadline timer is armed on the first call and kept, so a call abandoned
    /// mid-wait does not restart the clock.
    pub(super) async fn race(&mut self) -> TaskResult<T> {
        let won = match settled(self.deadline, &self.token) {
            Some(err) => Err(err),
            None => {
                let deadline = self.deadline;
                let sleep = self
                    .sleep
                    .get_or_insert_with(|| Box::pin(time::sleep(deadline)));
                match next(&mut self.rx, sleep.as_mut(), &self.token).await {
                    Signal::Message(res) => Ok(res),
                    Signal::Deadline => Err(TaskError::Timeout {
                        deadline: self.deadline,
                    }),
                    Signal::Canceled => Err(TaskError::Canceled),
                }
            }
        };
        self.sleep = None;
        self.rx.close();

        match won {
            Ok(res) => res,
            Err(err) => {
                report_interrupted(&self.bus, &self.label, &err);
                TaskResult::err(err)
            }
        }
    }
}
