//! # LogWriter — simple event printer
//!
//! A minimal subscriber that prints incoming [`Event`]s to stdout.
//! Use it for tests or demos.
//!
//! ## Example output
//! ```text
//! [starting] task="fetch"
//! [stopped] task="fetch" elapsed_ms=Some(52)
//! [failed] task="fetch" err="execution failed: refused" elapsed_ms=Some(3)
//! [timeout] task="fetch" deadline_ms=Some(100)
//! [wait-canceled] task="all[a,b]"
//! [breaker-rejected] command="payments" reason="circuit_open"
//! [breaker-opened] command="payments"
//! ```

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;
use async_trait::async_trait;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::TaskStarting => {
                println!("[starting] task={:?}", e.task);
            }
            EventKind::TaskStopped => {
                println!("[stopped] task={:?} elapsed_ms={:?}", e.task, e.elapsed_ms);
            }
            EventKind::TaskFailed => {
                println!(
                    "[failed] task={:?} err={:?} elapsed_ms={:?}",
                    e.task, e.reason, e.elapsed_ms
                );
            }
            EventKind::TimeoutHit => {
                println!("[timeout] task={:?} deadline_ms={:?}", e.task, e.deadline_ms);
            }
            EventKind::WaitCanceled => {
                println!("[wait-canceled] task={:?}", e.task);
            }
            EventKind::BreakerRejected => {
                println!(
                    "[breaker-rejected] command={:?} reason={:?}",
                    e.task, e.reason
                );
            }
            EventKind::BreakerOpened => {
                println!("[breaker-opened] command={:?}", e.task);
            }
            EventKind::BreakerClosed => {
                println!("[breaker-closed] command={:?}", e.task);
            }
            EventKind::SubscriberOverflow => {
                println!(
                    "[subscriber-overflow] subscriber={:?} reason={:?}",
                    e.task, e.reason
                );
            }
            EventKind::SubscriberPanicked => {
                println!(
                    "[subscriber-panicked] subscriber={} info={}",
                    e.task.as_deref().unwrap_or("unknown"),
                    e.reason.as_deref().unwrap_or("unknown"),
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
