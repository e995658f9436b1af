//! # Example: one_shot
//!
//! Submit single tasks and collect them under a deadline.
//!
//! Demonstrates how to:
//! - Define async work with [`TaskFn`] and blocking work with [`BlockingFn`].
//! - Submit without blocking and collect later with [`Outcome::get`](taskrace::Outcome::get).
//! - See a deadline and an external cancellation win the race.
//!
//! ## Flow
//! ```text
//! Executor::run_one(task, deadline, token)
//!     ├─► producer: run task, try_send(result)
//!     └─► Outcome::get()
//!           ├─ result   ──► TaskResult { Ok(value), elapsed }
//!           ├─ deadline ──► TaskError::Timeout
//!           └─ token    ──► TaskError::Canceled
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example one_shot
//! ```

use std::time::Duration;

use taskrace::{BlockingFn, Config, Executor, TaskFn, TaskRef, TaskResult};
use tokio_util::sync::CancellationToken;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let exec = Executor::new(Config::default());
    let token = CancellationToken::new();

    // 1. Happy path: the task finishes well within its deadline.
    let fetch: TaskRef<String> = TaskFn::arc("fetch", |_ctx: CancellationToken| async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        TaskResult::ok("payload".to_string())
    });
    let mut handle = exec.run_one(fetch, Duration::from_secs(1), &token);
    println!("[one_shot] submitted {:?}, doing other work...", handle.name());
    let res = handle.get().await;
    println!("[one_shot] value={:?} elapsed={:?}", res.value(), res.elapsed);

    // 2. Blocking work runs on tokio's blocking pool.
    let hash: TaskRef<u64> = BlockingFn::arc("hash", |_ctx: CancellationToken| {
        std::thread::sleep(Duration::from_millis(20));
        TaskResult::ok((1..=20u64).product::<u64>())
    });
    let res = exec.run_one(hash, Duration::from_secs(1), &token).get().await;
    println!("[one_shot] blocking value={:?}", res.value());

    // 3. Deadline: the task is slower than the caller is willing to wait.
    let slow: TaskRef<String> = TaskFn::arc("slow", |_ctx: CancellationToken| async {
        tokio::time::sleep(Duration::from_secs(3)).await;
        TaskResult::ok("too late".to_string())
    });
    let res = exec.run_one(slow, Duration::from_millis(100), &token).get().await;
    println!("[one_shot] slow -> {:?}", res.error().map(|e| e.as_label()));

    // 4. Cancellation: a cooperative task stops as soon as the token fires.
    let polite: TaskRef<String> = TaskFn::arc("polite", |ctx: CancellationToken| async move {
        tokio::select! {
            _ = ctx.cancelled() => TaskResult::fail("stopped"),
            _ = tokio::time::sleep(Duration::from_secs(3)) => TaskResult::ok("done".to_string()),
        }
    });
    let mut handle = exec.run_one(polite, Duration::from_secs(5), &token);
    let trigger = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });
    let res = handle.get().await;
    println!("[one_shot] polite -> {:?}", res.error().map(|e| e.as_message()));

    // Memoized: a second get returns immediately with the same outcome.
    assert_eq!(handle.get().await, res);
}
