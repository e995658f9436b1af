//! # Executor: turns tasks into handles.
//!
//! The [`Executor`] owns the event bus, the breaker registry and (when built with
//! subscribers) the listener that fans bus events out to them.
//!
//! ## Architecture
//! ```text
//! run_one(task)        ──► producer ──► [chan cap 1] ──► Outcome
//! run_first(tasks)     ──► producer ×N ──► [chan cap N] ──► FirstOutcome  (first wins)
//! run_all(tasks)       ──► producer ×N ──► [chan cap N] ──► AllOutcome    ((i, result) → slot i)
//! run_breaker(task)    ──► guard ──► circuit ──► producer ──► [chan cap 1] ──► Outcome
//!
//! producers ── publish(Event) ──► Bus ──► listener ──► SubscriberSet
//! ```
//!
//! ## Rules
//! - Submission never blocks and never awaits; only `get` on a handle suspends.
//! - Each task gets `token.child_token()`: cancelling the caller's token reaches the
//!   task, but nothing the executor does cancels the caller's token.
//! - Producers `try_send` into channels sized so a send never fails for lack of room;
//!   a send to a handle that stopped waiting is silently dropped.
//! - Dropping the executor stops the listener; already spawned tasks run to completion.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::{builder::ExecutorBuilder, config::Config, runner::spawn_detached};
use crate::{
    breaker::{BreakerRegistry, guard::run_guarded},
    events::Bus,
    outcome::{AllOutcome, FirstOutcome, Outcome, Waiter},
    tasks::TaskRef,
};

/// Submits tasks and hands back waitable handles.
pub struct Executor {
    cfg: Config,
    bus: Bus,
    breakers: Arc<BreakerRegistry>,
    shutdown: CancellationToken,
    listener: Option<JoinHandle<()>>,
}

impl Executor {
    /// Creates an executor without subscribers. Does not need a running runtime.
    pub fn new(cfg: Config) -> Self {
        ExecutorBuilder::new(cfg).build()
    }

    /// Starts a builder.
    pub fn builder(cfg: Config) -> ExecutorBuilder {
        ExecutorBuilder::new(cfg)
    }

    pub(super) fn new_internal(
        cfg: Config,
        bus: Bus,
        breakers: Arc<BreakerRegistry>,
        shutdown: CancellationToken,
        listener: Option<JoinHandle<()>>,
    ) -> Self {
        Self {
            cfg,
            bus,
            breakers,
            shutdown,
            listener,
        }
    }

    /// Configuration the executor was built with.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Event bus; subscribe to observe raw events.
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Breaker registry used by [`Executor::run_breaker`].
    pub fn breakers(&self) -> &BreakerRegistry {
        &self.breakers
    }

    /// Submits one task.
    ///
    /// `deadline` is measured from the first [`Outcome::get`] call, not from submission.
    pub fn run_one<T>(
        &self,
        task: TaskRef<T>,
        deadline: Duration,
        token: &CancellationToken,
    ) -> Outcome<T>
    where
        T: Send + 'static,
    {
        let (tx, rx) = mpsc::channel(1);
        let label = task.name().to_string();
        spawn_detached(task, token.child_token(), self.bus.clone(), move |res| {
            let _ = tx.try_send(res);
        });
        Outcome::new(Waiter::new(label, rx, deadline, token.clone(), self.bus.clone()))
    }

    /// Submits a group of tasks; the first delivered result wins.
    pub fn run_first<T>(
        &self,
        tasks: Vec<TaskRef<T>>,
        deadline: Duration,
        token: &CancellationToken,
    ) -> FirstOutcome<T>
    where
        T: Send + 'static,
    {
        let (tx, rx) = mpsc::channel(tasks.len().max(1));
        let label = group_label("first", &tasks);
        for task in tasks {
            let tx = tx.clone();
            spawn_detached(task, token.child_token(), self.bus.clone(), move |res| {
                let _ = tx.try_send(res);
            });
        }
        FirstOutcome::new(Waiter::new(label, rx, deadline, token.clone(), self.bus.clone()))
    }

    /// Submits a group of tasks and waits for all of them.
    ///
    /// Result `i` of the aggregate belongs to `tasks[i]`.
    pub fn run_all<T>(
        &self,
        tasks: Vec<TaskRef<T>>,
        deadline: Duration,
        token: &CancellationToken,
    ) -> AllOutcome<T>
    where
        T: Send + 'static,
    {
        let total = tasks.len();
        let (tx, rx) = mpsc::channel(total.max(1));
        let label = group_label("all", &tasks);
        for (idx, task) in tasks.into_iter().enumerate() {
            let tx = tx.clone();
            spawn_detached(task, token.child_token(), self.bus.clone(), move |res| {
                let _ = tx.try_send((idx, res));
            });
        }
        AllOutcome::new(label, rx, total, deadline, token.clone(), self.bus.clone())
    }

    /// Submits one task through the circuit breaker registered as `command`.
    ///
    /// The handle behaves like [`Executor::run_one`]'s; breaker refusals and breaker
    /// timeouts arrive as [`TaskError::BreakerRejected`](crate::TaskError::BreakerRejected).
    pub fn run_breaker<T>(
        &self,
        task: TaskRef<T>,
        command: &str,
        deadline: Duration,
        token: &CancellationToken,
    ) -> Outcome<T>
    where
        T: Send + 'static,
    {
        let (tx, rx) = mpsc::channel(1);
        let label = task.name().to_string();
        let circuit = self.breakers.circuit(command);
        let (ctx, bus) = (token.child_token(), self.bus.clone());
        tokio::spawn(async move {
            let res = run_guarded(circuit, task, ctx, bus).await;
            let _ = tx.try_send(res);
        });
        Outcome::new(Waiter::new(label, rx, deadline, token.clone(), self.bus.clone()))
    }

    /// Stops the subscriber listener and waits until every queued event was delivered.
    pub async fn shutdown(mut self) {
        self.shutdown.cancel();
        if let Some(listener) = self.listener.take() {
            let _ = listener.await;
        }
    }
}

impl Drop for Executor {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn group_label<T: Send + 'static>(kind: &str, tasks: &[TaskRef<T>]) -> String {
    let names: Vec<&str> = tasks.iter().map(|t| t.name()).collect();
    format!("{kind}[{}]", names.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        BreakerConfig, BreakerReason, CircuitState, TaskError, TaskFn, TaskResult,
        events::{Event, EventKind},
        subscribers::Subscribe,
    };
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::{Mutex, oneshot};
    use tokio::time::{self, Instant};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn sleeper(name: &'static str, after: u64) -> TaskRef<String> {
        TaskFn::arc(name, move |_ctx: CancellationToken| async move {
            time::sleep(ms(after)).await;
            TaskResult::ok(name.to_string())
        })
    }

    fn failing(name: &'static str) -> TaskRef<String> {
        TaskFn::arc(name, |_ctx: CancellationToken| async {
            TaskResult::<String>::fail("upstream down")
        })
    }

    fn explode() -> TaskResult<String> {
        panic!("kaboom")
    }

    fn within(elapsed: Duration, lo: u64, hi: u64) -> bool {
        elapsed >= ms(lo) && elapsed < ms(hi)
    }

    #[tokio::test(start_paused = true)]
    async fn submit_does_not_block_and_get_is_idempotent() {
        let exec = Executor::new(Config::default());
        let token = CancellationToken::new();

        let started = Instant::now();
        let mut h = exec.run_one(sleeper("slow", 300), ms(1000), &token);
        assert!(started.elapsed() < ms(1));
        assert!(!h.is_resolved());
        assert_eq!(h.name(), "slow");

        let first = h.get().await;
        assert_eq!(first.value().map(String::as_str), Some("slow"));
        assert!(within(started.elapsed(), 300, 310));

        let again = Instant::now();
        let second = h.get().await;
        assert_eq!(first, second);
        assert!(again.elapsed() < ms(1));
        assert_eq!(h.peek(), Some(&first));
    }

    #[tokio::test(start_paused = true)]
    async fn happy_path_reports_elapsed() {
        let exec = Executor::new(Config::default());
        let mut h = exec.run_one(sleeper("quick", 50), ms(1000), &CancellationToken::new());

        let res = h.get().await;
        assert!(res.is_ok());
        assert!(res.elapsed.is_some_and(|e| within(e, 50, 55)));
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_beats_slow_task() {
        let exec = Executor::new(Config::default());
        let mut h = exec.run_one(sleeper("slow", 3000), ms(100), &CancellationToken::new());

        let started = Instant::now();
        let res = h.get().await;
        assert_eq!(res.error(), Some(&TaskError::Timeout { deadline: ms(100) }));
        assert!(within(started.elapsed(), 100, 110));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_deadline_resolves_immediately() {
        let exec = Executor::new(Config::default());
        let mut h = exec.run_one(sleeper("any", 10), Duration::ZERO, &CancellationToken::new());

        let started = Instant::now();
        let res = h.get().await;
        assert!(res.error().is_some_and(TaskError::is_timeout));
        assert!(started.elapsed() < ms(1));
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_stops_waiting() {
        let exec = Executor::new(Config::default());
        let token = CancellationToken::new();
        let mut h = exec.run_one(sleeper("slow", 3000), ms(5000), &token);

        let trigger = token.clone();
        tokio::spawn(async move {
            time::sleep(ms(100)).await;
            trigger.cancel();
        });

        let started = Instant::now();
        let res = h.get().await;
        assert_eq!(res.error(), Some(&TaskError::Canceled));
        assert!(within(started.elapsed(), 100, 110));
    }

    #[tokio::test(start_paused = true)]
    async fn fired_token_wins_over_finished_task() {
        let exec = Executor::new(Config::default());
        let token = CancellationToken::new();
        let mut h = exec.run_one(sleeper("instant", 0), ms(1000), &token);

        time::sleep(ms(10)).await;
        token.cancel();
        assert_eq!(h.get().await.error(), Some(&TaskError::Canceled));
    }

    #[tokio::test(start_paused = true)]
    async fn task_sees_cancellation_through_child_token() {
        let exec = Executor::new(Config::default());
        let token = CancellationToken::new();
        let (seen_tx, seen_rx) = oneshot::channel::<()>();
        let seen_tx = std::sync::Mutex::new(Some(seen_tx));

        let t: TaskRef<String> = TaskFn::arc("polite", move |ctx: CancellationToken| {
            let seen = seen_tx.lock().ok().and_then(|mut s| s.take());
            async move {
                ctx.cancelled().await;
                if let Some(tx) = seen {
                    let _ = tx.send(());
                }
                TaskResult::<String>::err(TaskError::Canceled)
            }
        });
        let _h = exec.run_one(t, ms(1000), &token);

        token.cancel();
        assert!(time::timeout(ms(10), seen_rx).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn panic_becomes_error() {
        let exec = Executor::new(Config::default());
        let t: TaskRef<String> = TaskFn::arc("bad", |_ctx: CancellationToken| async { explode() });

        let res = exec.run_one(t, ms(1000), &CancellationToken::new()).get().await;
        assert_eq!(
            res.error(),
            Some(&TaskError::Panicked {
                reason: "kaboom".into()
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn first_of_many_returns_fastest() {
        let exec = Executor::new(Config::default());
        let tasks = vec![
            sleeper("Task1", 2000),
            sleeper("Task2", 1000),
            sleeper("Task3", 3000),
        ];
        let started = Instant::now();
        let mut h = exec.run_first(tasks, ms(3500), &CancellationToken::new());
        assert!(started.elapsed() < ms(1));
        assert_eq!(h.name(), "first[Task1,Task2,Task3]");

        let res = h.get().await;
        assert_eq!(res.value().map(String::as_str), Some("Task2"));
        assert!(within(started.elapsed(), 1000, 1100));
        assert_eq!(h.get().await, res);
    }

    #[tokio::test(start_paused = true)]
    async fn first_returns_a_task_error_verbatim() {
        let exec = Executor::new(Config::default());
        let mut h = exec.run_first(
            vec![failing("broken"), sleeper("slow", 500)],
            ms(1000),
            &CancellationToken::new(),
        );
        assert_eq!(
            h.get().await.error(),
            Some(&TaskError::Fail {
                error: "upstream down".into()
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn first_of_none_waits_for_deadline() {
        let exec = Executor::new(Config::default());
        let mut h = exec.run_first(Vec::<TaskRef<String>>::new(), ms(200), &CancellationToken::new());

        let started = Instant::now();
        assert!(h.get().await.error().is_some_and(TaskError::is_timeout));
        assert!(within(started.elapsed(), 200, 210));
    }

    #[tokio::test(start_paused = true)]
    async fn all_keeps_partial_results_on_timeout() {
        let exec = Executor::new(Config::default());
        let tasks = vec![
            sleeper("Task1", 2000),
            sleeper("Task2", 1000),
            sleeper("Task3", 3000),
        ];
        let started = Instant::now();
        let mut h = exec.run_all(tasks, ms(2100), &CancellationToken::new());
        assert!(started.elapsed() < ms(1));
        assert_eq!(h.len(), 3);

        let all = h.get().await;
        assert!(within(started.elapsed(), 2100, 2200));
        assert_eq!(all.error, Some(TaskError::Timeout { deadline: ms(2100) }));
        assert_eq!(all.completed(), 2);
        assert_eq!(
            all.results[0].as_ref().and_then(|r| r.value()).map(String::as_str),
            Some("Task1")
        );
        assert_eq!(
            all.results[1].as_ref().and_then(|r| r.value()).map(String::as_str),
            Some("Task2")
        );
        assert!(all.results[2].is_none());
        assert_eq!(h.get().await, all);
    }

    #[tokio::test(start_paused = true)]
    async fn all_completes_before_deadline() {
        let exec = Executor::new(Config::default());
        let tasks = vec![
            sleeper("Task1", 2000),
            sleeper("Task2", 1000),
            sleeper("Task3", 3000),
        ];
        let started = Instant::now();
        let mut h = exec.run_all(tasks, ms(3500), &CancellationToken::new());
        assert!(started.elapsed() < ms(1));

        let all = h.get().await;
        assert!(within(started.elapsed(), 3000, 3050));
        assert!(all.error.is_none());
        assert!(all.is_complete());
        let names: Vec<&str> = all
            .results
            .iter()
            .filter_map(|r| r.as_ref().and_then(|r| r.value()).map(String::as_str))
            .collect();
        assert_eq!(names, vec!["Task1", "Task2", "Task3"]);
    }

    #[tokio::test(start_paused = true)]
    async fn all_of_none_is_complete() {
        let exec = Executor::new(Config::default());
        let mut h = exec.run_all(Vec::<TaskRef<String>>::new(), ms(100), &CancellationToken::new());
        assert!(h.is_empty());

        let started = Instant::now();
        let all = h.get().await;
        assert!(all.error.is_none());
        assert!(all.results.is_empty());
        assert!(started.elapsed() < ms(1));
    }

    #[tokio::test(start_paused = true)]
    async fn all_canceled_keeps_delivered_slots() {
        let exec = Executor::new(Config::default());
        let token = CancellationToken::new();
        let mut h = exec.run_all(
            vec![sleeper("fast", 50), sleeper("slow", 3000)],
            ms(5000),
            &token,
        );

        let trigger = token.clone();
        tokio::spawn(async move {
            time::sleep(ms(200)).await;
            trigger.cancel();
        });

        let all = h.get().await;
        assert_eq!(all.error, Some(TaskError::Canceled));
        assert!(all.results[0].is_some());
        assert!(all.results[1].is_none());
    }

    fn flagging(name: &'static str, after: u64, done: Arc<AtomicBool>) -> TaskRef<String> {
        TaskFn::arc(name, move |_ctx: CancellationToken| {
            let done = Arc::clone(&done);
            async move {
                time::sleep(ms(after)).await;
                done.store(true, Ordering::SeqCst);
                TaskResult::ok(name.to_string())
            }
        })
    }

    #[tokio::test(start_paused = true)]
    async fn first_losers_keep_running() {
        let exec = Executor::new(Config::default());
        let loser_done = Arc::new(AtomicBool::new(false));
        let mut h = exec.run_first(
            vec![sleeper("winner", 100), flagging("loser", 300, loser_done.clone())],
            ms(1000),
            &CancellationToken::new(),
        );

        assert_eq!(h.get().await.value().map(String::as_str), Some("winner"));
        assert!(!loser_done.load(Ordering::SeqCst));

        time::sleep(ms(250)).await;
        assert!(loser_done.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn timed_out_task_keeps_running() {
        let exec = Executor::new(Config::default());
        let done = Arc::new(AtomicBool::new(false));
        let mut h = exec.run_one(flagging("slow", 300, done.clone()), ms(100), &CancellationToken::new());

        assert!(h.get().await.error().is_some_and(TaskError::is_timeout));
        assert!(!done.load(Ordering::SeqCst));

        time::sleep(ms(250)).await;
        assert!(done.load(Ordering::SeqCst));
        assert!(h.get().await.error().is_some_and(TaskError::is_timeout));
    }

    #[tokio::test(start_paused = true)]
    async fn abandoned_all_get_keeps_collected_slots() {
        let exec = Executor::new(Config::default());
        let started = Instant::now();
        let mut h = exec.run_all(
            vec![sleeper("a", 100), sleeper("b", 500)],
            ms(1000),
            &CancellationToken::new(),
        );

        assert!(time::timeout(ms(200), h.get()).await.is_err());
        assert!(!h.is_resolved());

        let all = h.get().await;
        assert!(all.error.is_none());
        assert!(all.is_complete());
        assert_eq!(
            all.results[0].as_ref().and_then(|r| r.value()).map(String::as_str),
            Some("a")
        );
        assert!(within(started.elapsed(), 500, 510));
    }

    #[tokio::test(start_paused = true)]
    async fn abandoned_all_get_keeps_the_original_deadline() {
        let exec = Executor::new(Config::default());
        let started = Instant::now();
        let mut h = exec.run_all(
            vec![sleeper("a", 100), sleeper("slow", 3000)],
            ms(500),
            &CancellationToken::new(),
        );

        assert!(time::timeout(ms(200), h.get()).await.is_err());

        let all = h.get().await;
        assert_eq!(all.error, Some(TaskError::Timeout { deadline: ms(500) }));
        assert!(all.results[0].is_some());
        assert!(all.results[1].is_none());
        assert!(within(started.elapsed(), 500, 510));
    }

    #[tokio::test(start_paused = true)]
    async fn abandoned_single_get_keeps_the_original_deadline() {
        let exec = Executor::new(Config::default());
        let started = Instant::now();
        let mut h = exec.run_one(sleeper("slow", 3000), ms(500), &CancellationToken::new());

        assert!(time::timeout(ms(200), h.get()).await.is_err());

        assert!(h.get().await.error().is_some_and(TaskError::is_timeout));
        assert!(within(started.elapsed(), 500, 510));
    }

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<Event>>,
    }

    #[async_trait]
    impl Subscribe for Recorder {
        async fn on_event(&self, event: &Event) {
            self.seen.lock().await.push(event.clone());
        }

        fn name(&self) -> &'static str {
            "recorder"
        }
    }

    #[tokio::test(start_paused = true)]
    async fn subscribers_see_lifecycle_and_timeouts() {
        let rec = Arc::new(Recorder::default());
        let exec = Executor::builder(Config::default())
            .with_subscribers(vec![rec.clone() as Arc<dyn Subscribe>])
            .build();

        let ok = exec
            .run_one(sleeper("quick", 10), ms(1000), &CancellationToken::new())
            .get()
            .await;
        assert!(ok.is_ok());
        let late = exec
            .run_one(sleeper("late", 3000), ms(100), &CancellationToken::new())
            .get()
            .await;
        assert!(late.error().is_some_and(TaskError::is_timeout));
        exec.shutdown().await;

        let seen = rec.seen.lock().await;
        let kinds: Vec<EventKind> = seen.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::TaskStarting,
                EventKind::TaskStopped,
                EventKind::TaskStarting,
                EventKind::TimeoutHit,
            ]
        );
        assert_eq!(seen[3].task.as_deref(), Some("late"));
        assert_eq!(seen[3].deadline_ms, Some(100));
        assert!(seen.windows(2).all(|w| w[0].seq < w[1].seq));
    }

    fn touchy() -> BreakerConfig {
        BreakerConfig {
            timeout: ms(1000),
            max_concurrent_requests: 2,
            request_volume_threshold: 2,
            error_percent_threshold: 5,
            sleep_window: ms(2000),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn breaker_happy_path() {
        let exec = Executor::new(Config::default());
        exec.breakers().configure("cmd", touchy());

        let started = Instant::now();
        let mut h = exec.run_breaker(sleeper("ok", 300), "cmd", ms(1000), &CancellationToken::new());
        assert!(started.elapsed() < ms(1));

        let res = h.get().await;
        assert_eq!(res.value().map(String::as_str), Some("ok"));
        assert!(within(started.elapsed(), 300, 310));
        assert_eq!(
            exec.breakers().circuit("cmd").state().await,
            CircuitState::Closed
        );
    }

    #[tokio::test(start_paused = true)]
    async fn breaker_timeout_cancels_the_task() {
        let exec = Executor::new(Config::default());
        exec.breakers().configure(
            "cmd",
            BreakerConfig {
                timeout: ms(100),
                ..touchy()
            },
        );

        let (seen_tx, seen_rx) = oneshot::channel::<()>();
        let seen_tx = std::sync::Mutex::new(Some(seen_tx));
        let t: TaskRef<String> = TaskFn::arc("stuck", move |ctx: CancellationToken| {
            let seen = seen_tx.lock().ok().and_then(|mut s| s.take());
            async move {
                tokio::select! {
                    _ = time::sleep(ms(300)) => TaskResult::ok("late".to_string()),
                    _ = ctx.cancelled() => {
                        if let Some(tx) = seen {
                            let _ = tx.send(());
                        }
                        TaskResult::err(TaskError::Canceled)
                    }
                }
            }
        });

        let started = Instant::now();
        let res = exec
            .run_breaker(t, "cmd", ms(1000), &CancellationToken::new())
            .get()
            .await;
        assert_eq!(
            res.error(),
            Some(&TaskError::BreakerRejected {
                reason: BreakerReason::Timeout
            })
        );
        assert!(within(started.elapsed(), 100, 110));
        assert!(time::timeout(ms(10), seen_rx).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn handle_deadline_can_fire_before_breaker_timeout() {
        let exec = Executor::new(Config::default());
        exec.breakers().configure("cmd", touchy());

        let started = Instant::now();
        let res = exec
            .run_breaker(sleeper("slow", 300), "cmd", ms(100), &CancellationToken::new())
            .get()
            .await;
        assert_eq!(res.error(), Some(&TaskError::Timeout { deadline: ms(100) }));
        assert!(within(started.elapsed(), 100, 110));
    }

    #[tokio::test(start_paused = true)]
    async fn breaker_rejects_over_max_concurrency() {
        let exec = Executor::new(Config::default());
        exec.breakers().configure("cmd", touchy());
        let token = CancellationToken::new();

        let mut a = exec.run_breaker(sleeper("a", 300), "cmd", ms(1000), &token);
        time::sleep(ms(100)).await;
        let mut b = exec.run_breaker(sleeper("b", 300), "cmd", ms(1000), &token);
        time::sleep(ms(100)).await;
        let mut c = exec.run_breaker(sleeper("c", 300), "cmd", ms(1000), &token);

        let started = Instant::now();
        assert_eq!(
            c.get().await.error(),
            Some(&TaskError::BreakerRejected {
                reason: BreakerReason::MaxConcurrency
            })
        );
        assert!(started.elapsed() < ms(1));
        assert!(a.get().await.is_ok());
        assert!(b.get().await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn circuit_opens_on_errors_and_closes_after_trial() {
        let exec = Executor::new(Config::default());
        exec.breakers().configure(
            "cmd",
            BreakerConfig {
                error_percent_threshold: 50,
                ..touchy()
            },
        );
        let mut events = exec.bus().subscribe();
        let token = CancellationToken::new();

        for _ in 0..2 {
            let res = exec.run_breaker(failing("flaky"), "cmd", ms(1000), &token).get().await;
            assert!(matches!(res.error(), Some(TaskError::Fail { .. })));
        }
        let circuit = exec.breakers().circuit("cmd");
        assert_eq!(circuit.state().await, CircuitState::Open);

        let res = exec.run_breaker(sleeper("ok", 10), "cmd", ms(1000), &token).get().await;
        assert_eq!(
            res.error(),
            Some(&TaskError::BreakerRejected {
                reason: BreakerReason::CircuitOpen
            })
        );

        time::sleep(ms(2000)).await;
        let res = exec.run_breaker(sleeper("ok", 10), "cmd", ms(1000), &token).get().await;
        assert!(res.is_ok());
        assert_eq!(circuit.state().await, CircuitState::Closed);

        let mut breaker_kinds = Vec::new();
        while let Ok(ev) = events.try_recv() {
            if matches!(
                ev.kind,
                EventKind::BreakerOpened | EventKind::BreakerClosed | EventKind::BreakerRejected
            ) {
                breaker_kinds.push(ev.kind);
            }
        }
        assert_eq!(
            breaker_kinds,
            vec![
                EventKind::BreakerOpened,
                EventKind::BreakerRejected,
                EventKind::BreakerClosed,
            ]
        );
    }
}
