//! # Event fan-out.
//!
//! The executor's bus listener hands every event to [`SubscriberSet::emit`], which
//! pushes it onto one bounded queue per interested subscriber. Workers drain the
//! queues; a panicking `on_event` is reported as `SubscriberPanicked` and the worker
//! moves on to the next event.
//!
//! ```text
//! listener ──► emit(event) ──► Arc<Event>
//!                 ├─ accepts? ──► [lane A] ──► worker A ──► A.on_event
//!                 ├─ accepts? ──► [lane B] ──► worker B ──► B.on_event
//!                 └─ full     ──► SubscriberOverflow on the bus
//! ```
//!
//! Events reach each subscriber in bus order; there is no ordering across subscribers.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::{
    sync::mpsc::{self, error::TrySendError},
    task::JoinHandle,
};

use crate::events::{Bus, Event, EventKind};
use crate::subscribers::Subscribe;

struct Lane {
    sub: Arc<dyn Subscribe>,
    tx: mpsc::Sender<Arc<Event>>,
}

/// Per-subscriber queues and their workers.
pub(crate) struct SubscriberSet {
    lanes: Vec<Lane>,
    workers: Vec<JoinHandle<()>>,
    bus: Bus,
}

impl SubscriberSet {
    /// Spawns one worker per subscriber. Must be called inside a tokio runtime.
    pub(crate) fn new(subs: Vec<Arc<dyn Subscribe>>, bus: Bus) -> Self {
        let (lanes, workers) = subs
            .into_iter()
            .map(|sub| {
                let (tx, rx) = mpsc::channel(sub.queue_capacity().max(1));
                let worker = tokio::spawn(deliver(Arc::clone(&sub), rx, bus.clone()));
                (Lane { sub, tx }, worker)
            })
            .unzip();
        Self {
            lanes,
            workers,
            bus,
        }
    }

    /// Queues `event` for every subscriber that accepts its kind. Never waits.
    ///
    /// Overflow reports are not themselves reported when they overflow.
    pub(crate) fn emit(&self, event: Event) {
        let kind = event.kind;
        let event = Arc::new(event);

        for lane in self.lanes.iter().filter(|l| l.sub.accepts(kind)) {
            let reason = match lane.tx.try_send(Arc::clone(&event)) {
                Ok(()) => continue,
                Err(TrySendError::Full(_)) => "full",
                Err(TrySendError::Closed(_)) => "closed",
            };
            if kind != EventKind::SubscriberOverflow {
                self.bus
                    .publish(Event::subscriber_overflow(lane.sub.name(), reason));
            }
        }
    }

    /// Closes every queue and waits until the workers delivered what was queued.
    pub(crate) async fn shutdown(self) {
        drop(self.lanes);
        for worker in self.workers {
            let _ = worker.await;
        }
    }
}

async fn deliver(sub: Arc<dyn Subscribe>, mut rx: mpsc::Receiver<Arc<Event>>, bus: Bus) {
    while let Some(ev) = rx.recv().await {
        let outcome = AssertUnwindSafe(sub.on_event(&ev)).catch_unwind().await;
        if let Err(payload) = outcome {
            let info = crate::core::panic_message(&*payload);
            bus.publish(Event::subscriber_panicked(sub.name(), info));
        }
    }
}
