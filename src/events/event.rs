//! # Runtime events emitted by producers, handles and breakers.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Task events**: a producer started or finished a task
//! - **Wait events**: a handle gave up on its tasks (deadline, cancellation)
//! - **Breaker events**: rejections and circuit state changes
//!
//! The [`Event`] struct carries additional metadata such as timestamps, task name,
//! reasons, deadlines and elapsed times.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Use `seq` to restore the exact order when events are delivered out of order.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use taskrace::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::TimeoutHit)
//!     .with_task("fetch")
//!     .with_deadline(Duration::from_millis(250));
//!
//! assert_eq!(ev.kind, EventKind::TimeoutHit);
//! assert_eq!(ev.task.as_deref(), Some("fetch"));
//! assert_eq!(ev.deadline_ms, Some(250));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Subscriber events ===
    /// Subscriber panicked during event processing.
    ///
    /// Sets:
    /// - `task`: subscriber name
    /// - `reason`: panic info/message
    SubscriberPanicked,

    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets:
    /// - `task`: subscriber name
    /// - `reason`: reason string (e.g., "full", "closed")
    SubscriberOverflow,

    // === Task events ===
    /// A producer started running a task.
    ///
    /// Sets:
    /// - `task`: task name
    TaskStarting,

    /// A task finished with a value.
    ///
    /// Sets:
    /// - `task`: task name
    /// - `elapsed_ms`: time the task took
    TaskStopped,

    /// A task finished with an error (domain failure or panic).
    ///
    /// Sets:
    /// - `task`: task name
    /// - `reason`: error message
    /// - `elapsed_ms`: time the task took
    TaskFailed,

    // === Wait events ===
    /// A handle resolved because its deadline elapsed.
    ///
    /// Sets:
    /// - `task`: handle label
    /// - `deadline_ms`: configured deadline
    TimeoutHit,

    /// A handle resolved because its cancellation token fired.
    ///
    /// Sets:
    /// - `task`: handle label
    WaitCanceled,

    // === Breaker events ===
    /// The breaker refused or cut short an execution.
    ///
    /// Sets:
    /// - `task`: command name
    /// - `reason`: breaker reason label
    BreakerRejected,

    /// A circuit tripped open.
    ///
    /// Sets:
    /// - `task`: command name
    BreakerOpened,

    /// A half-open circuit closed after a successful trial.
    ///
    /// Sets:
    /// - `task`: command name
    BreakerClosed,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,

    /// Handle deadline in milliseconds (compact).
    pub deadline_ms: Option<u32>,
    /// Task running time in milliseconds (compact).
    pub elapsed_ms: Option<u32>,
    /// Human-readable reason (errors, overflow details, etc.).
    pub reason: Option<Arc<str>>,
    /// Name of the task, handle or command, if applicable.
    pub task: Option<Arc<str>>,
    /// Event classification.
    pub kind: EventKind,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            deadline_ms: None,
            elapsed_ms: None,
            reason: None,
            task: None,
            kind,
        }
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches a task (or handle/command) name.
    #[inline]
    pub fn with_task(mut self, task: impl Into<Arc<str>>) -> Self {
        self.task = Some(task.into());
        self
    }

    /// Attaches a deadline (stored as milliseconds).
    #[inline]
    pub fn with_deadline(mut self, d: Duration) -> Self {
        self.deadline_ms = Some(compact_ms(d));
        self
    }

    /// Attaches an elapsed time (stored as milliseconds).
    #[inline]
    pub fn with_elapsed(mut self, d: Duration) -> Self {
        self.elapsed_ms = Some(compact_ms(d));
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_task(subscriber)
            .with_reason(format!("subscriber={subscriber} reason={reason}"))
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_task(subscriber)
            .with_reason(info)
    }
}

fn compact_ms(d: Duration) -> u32 {
    d.as_millis().min(u128::from(u32::MAX)) as u32
}
