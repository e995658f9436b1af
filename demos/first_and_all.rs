//! # Example: first_and_all
//!
//! Compose several tasks into "first one wins" and "wait for all" handles.
//!
//! ## Flow
//! ```text
//! run_first([Task1 2s, Task2 1s, Task3 3s], 3.5s) ──► Task2 after ~1s
//! run_all  ([Task1 2s, Task2 1s, Task3 3s], 2.1s) ──► [Task1, Task2, None] + Timeout
//! run_all  ([Task1 2s, Task2 1s, Task3 3s], 3.5s) ──► [Task1, Task2, Task3]
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example first_and_all --features logging
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use taskrace::{Config, Executor, Subscribe, TaskFn, TaskRef, TaskResult};
use tokio_util::sync::CancellationToken;

fn sleeper(name: &'static str, ms: u64) -> TaskRef<&'static str> {
    TaskFn::arc(name, move |_ctx: CancellationToken| async move {
        tokio::time::sleep(Duration::from_millis(ms)).await;
        TaskResult::ok(name)
    })
}

fn batch() -> Vec<TaskRef<&'static str>> {
    vec![
        sleeper("Task1", 2000),
        sleeper("Task2", 1000),
        sleeper("Task3", 3000),
    ]
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    #[cfg(feature = "logging")]
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(taskrace::LogWriter::new())];
    #[cfg(not(feature = "logging"))]
    let subs: Vec<Arc<dyn Subscribe>> = Vec::new();

    let exec = Executor::builder(Config::default())
        .with_subscribers(subs)
        .build();
    let token = CancellationToken::new();

    let started = Instant::now();
    let first = exec
        .run_first(batch(), Duration::from_millis(3500), &token)
        .get()
        .await;
    println!(
        "[first] winner={:?} after {:?}",
        first.value(),
        started.elapsed()
    );

    let started = Instant::now();
    let partial = exec
        .run_all(batch(), Duration::from_millis(2100), &token)
        .get()
        .await;
    println!(
        "[all 2.1s] {}/{} delivered, error={:?}, after {:?}",
        partial.completed(),
        partial.results.len(),
        partial.error.as_ref().map(|e| e.as_label()),
        started.elapsed()
    );

    let started = Instant::now();
    let full = exec
        .run_all(batch(), Duration::from_millis(3500), &token)
        .get()
        .await;
    let values: Vec<_> = full
        .results
        .iter()
        .map(|slot| slot.as_ref().and_then(|r| r.value().copied()))
        .collect();
    println!("[all 3.5s] {values:?} after {:?}", started.elapsed());

    exec.shutdown().await;
}
