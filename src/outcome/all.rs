//! # All-of handle.
//!
//! [`AllOutcome`] is returned by [`Executor::run_all`](crate::Executor::run_all).
//! Task `i` sends `(i, result)` on a channel sized to the task count; the handle owns
//! the slot vector and is its only writer. The slot content and its completion token
//! travel in the same message, so a slot is never observed half-written.
//!
//! ## Waiting
//! ```text
//! while outstanding > 0:
//!     select (biased):
//!       cancellation ──► error = Canceled, stop
//!       deadline     ──► error = Timeout,  stop
//!       (i, result)  ──► slots[i] = result, outstanding -= 1
//! drain results already sitting in the channel (non-blocking)
//! ```
//!
//! A terminal event does not erase partial results: every result delivered before it
//! is kept, the rest stay `None`. Stragglers are not cancelled.
//!
//! Slots, the outstanding count and the deadline timer live on the handle, so a `get`
//! future dropped mid-wait (e.g. under the caller's own `timeout`) loses nothing: the
//! next `get` resumes with the same slots and the same deadline.

use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{self, Sleep};
use tokio_util::sync::CancellationToken;

use super::race::{Signal, next, report_interrupted, settled};
use crate::{error::TaskError, events::Bus, tasks::TaskResult};

/// Aggregate outcome of [`AllOutcome::get`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllResults<T> {
    /// One slot per submitted task, in submission order. `None` = not delivered in time.
    pub results: Vec<Option<TaskResult<T>>>,
    /// `Timeout` or `Canceled` if waiting stopped early, `None` if every task delivered.
    pub error: Option<TaskError>,
}

impl<T> AllResults<T> {
    /// True if every slot holds a result.
    pub fn is_complete(&self) -> bool {
        self.results.iter().all(Option::is_some)
    }

    /// Number of slots holding a result.
    pub fn completed(&self) -> usize {
        self.results.iter().filter(|r| r.is_some()).count()
    }
}

/// Handle to a group of tasks that are all awaited.
pub struct AllOutcome<T> {
    label: Arc<str>,
    rx: mpsc::Receiver<(usize, TaskResult<T>)>,
    slots: Vec<Option<TaskResult<T>>>,
    total: usize,
    outstanding: usize,
    deadline: Duration,
    sleep: Option<Pin<Box<Sleep>>>,
    token: CancellationToken,
    bus: Bus,
    resolved: Option<AllResults<T>>,
}

impl<T> AllOutcome<T> {
    pub(crate) fn new(
        label: impl Into<Arc<str>>,
        rx: mpsc::Receiver<(usize, TaskResult<T>)>,
        total: usize,
        deadline: Duration,
        token: CancellationToken,
        bus: Bus,
    ) -> Self {
        Self {
            label: label.into(),
            rx,
            slots: std::iter::repeat_with(|| None).take(total).collect(),
            total,
            outstanding: total,
            deadline,
            sleep: None,
            token,
            bus,
            resolved: None,
        }
    }

    /// Label of the group, e.g. `all[a,b,c]`.
    pub fn name(&self) -> &str {
        &self.label
    }

    /// Number of submitted tasks (and slots).
    pub fn len(&self) -> usize {
        self.total
    }

    /// True if no tasks were submitted.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Deadline measured from the first `get` call.
    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// True once `get` has produced a result.
    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }

    /// The memoized aggregate, if already resolved. Never waits.
    pub fn peek(&self) -> Option<&AllResults<T>> {
        self.resolved.as_ref()
    }

    /// Stores one delivered result. A repeated index is ignored.
    fn fill(&mut self, idx: usize, res: TaskResult<T>) {
        if let Some(slot) = self.slots.get_mut(idx).filter(|s| s.is_none()) {
            *slot = Some(res);
            self.outstanding -= 1;
        }
    }

    /// Waits for the remaining slots. Cancel-safe: every received result is stored on
    /// the handle before the next await.
    async fn wait(&mut self) -> Option<TaskError> {
        if self.outstanding == 0 {
            return None;
        }
        if let Some(err) = settled(self.deadline, &self.token) {
            return Some(err);
        }

        let deadline = self.deadline;
        while self.outstanding > 0 {
            let sleep = self
                .sleep
                .get_or_insert_with(|| Box::pin(time::sleep(deadline)));
            match next(&mut self.rx, sleep.as_mut(), &self.token).await {
                Signal::Message((idx, res)) => self.fill(idx, res),
                Signal::Deadline => return Some(TaskError::Timeout { deadline }),
                Signal::Canceled => return Some(TaskError::Canceled),
            }
        }
        None
    }

    async fn gather(&mut self) -> AllResults<T> {
        let error = self.wait().await;

        self.sleep = None;
        self.rx.close();
        while let Ok((idx, res)) = self.rx.try_recv() {
            self.fill(idx, res);
        }

        if let Some(err) = &error {
            report_interrupted(&self.bus, &self.label, err);
        }
        AllResults {
            results: std::mem::take(&mut self.slots),
            error,
        }
    }
}

impl<T: Clone> AllOutcome<T> {
    /// Waits until every task delivered, the deadline elapsed, or cancellation fired.
    ///
    /// The first completed call computes the aggregate and memoizes it; later calls
    /// return a clone immediately. A call abandoned mid-wait keeps what it collected.
    pub async fn get(&mut self) -> AllResults<T> {
        if let Some(done) = &self.resolved {
            return done.clone();
        }
        let res = self.gather().await;
        self.resolved = Some(res.clone());
        res
    }
}
