//! # Example: breaker
//!
//! Route a flaky dependency through a named circuit breaker and watch it trip,
//! short-circuit, and recover.
//!
//! ## Flow
//! ```text
//! configure("inventory", threshold = 2 requests @ 50%)
//!   failures ×2      ──► BreakerOpened
//!   next call        ──► BreakerRejected { CircuitOpen }   (no task runs)
//!   sleep window     ──► HalfOpen trial succeeds ──► BreakerClosed
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example breaker --features logging
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use taskrace::{BreakerConfig, Config, Executor, LogWriter, Subscribe, TaskFn, TaskRef, TaskResult};
use tokio_util::sync::CancellationToken;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
    let exec = Executor::builder(Config::default())
        .with_subscribers(subs)
        .build();

    exec.breakers().configure(
        "inventory",
        BreakerConfig {
            timeout: Duration::from_millis(500),
            max_concurrent_requests: 4,
            request_volume_threshold: 2,
            error_percent_threshold: 50,
            sleep_window: Duration::from_millis(300),
        },
    );

    let healthy = Arc::new(AtomicBool::new(false));
    let lookup: TaskRef<u32> = {
        let healthy = Arc::clone(&healthy);
        TaskFn::arc("lookup", move |_ctx: CancellationToken| {
            let ok = healthy.load(Ordering::Relaxed);
            async move {
                tokio::time::sleep(Duration::from_millis(20)).await;
                if ok {
                    TaskResult::ok(42u32)
                } else {
                    TaskResult::fail("connection refused")
                }
            }
        })
    };

    let token = CancellationToken::new();
    for round in 1..=3 {
        let res = exec
            .run_breaker(Arc::clone(&lookup), "inventory", Duration::from_secs(1), &token)
            .get()
            .await;
        println!("[breaker] round {round}: {:?}", res.outcome);
    }

    healthy.store(true, Ordering::Relaxed);
    tokio::time::sleep(Duration::from_millis(300)).await;

    let res = exec
        .run_breaker(lookup, "inventory", Duration::from_secs(1), &token)
        .get()
        .await;
    println!("[breaker] after sleep window: {:?}", res.outcome);

    if let Some(circuit) = exec.breakers().get("inventory") {
        println!("[breaker] state={}", circuit.state().await.as_label());
    }
    exec.shutdown().await;
}
