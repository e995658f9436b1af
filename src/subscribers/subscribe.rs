//! # Subscriber trait
//!
//! A [`Subscribe`] implementation receives the runtime events the executor
//! publishes: task lifecycle, handles giving up, breaker state changes.
//!
//! Each subscriber gets its own bounded queue and worker, so a slow `on_event`
//! never delays producers, handles or other subscribers. When the queue is full the
//! event is dropped for that subscriber and `SubscriberOverflow` is published.

use async_trait::async_trait;

use crate::events::{Event, EventKind};

/// Contract for event subscribers.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Handles one event.
    async fn on_event(&self, event: &Event);

    /// Name used in overflow and panic reports.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Kinds this subscriber wants. Filtered events never reach its queue.
    ///
    /// A breaker dashboard might keep only `BreakerOpened` / `BreakerClosed`.
    fn accepts(&self, _kind: EventKind) -> bool {
        true
    }

    /// Queue capacity (min 1).
    fn queue_capacity(&self) -> usize {
        256
    }
}
