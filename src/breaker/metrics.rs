//! # Rolling health window.
//!
//! Counts breaker samples in ten one-second buckets. Buckets older than the window
//! are evicted lazily on every access, so an idle circuit forgets old failures.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::time::Instant;

const BUCKET_WIDTH: Duration = Duration::from_secs(1);
const WINDOW: Duration = Duration::from_secs(10);

/// One observation fed into the window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Sample {
    Success,
    Failure,
    Rejection,
}

#[derive(Clone, Copy, Debug, Default)]
struct Bucket {
    successes: u64,
    failures: u64,
    rejections: u64,
}

/// Summary of the current window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Health {
    /// Every recorded sample.
    pub requests: u64,
    /// Failures and rejections.
    pub errors: u64,
}

impl Health {
    /// Error percentage, 0 for an empty window.
    pub fn error_percent(&self) -> u64 {
        if self.requests == 0 {
            0
        } else {
            self.errors * 100 / self.requests
        }
    }
}

/// Bucketed counters over the last [`WINDOW`].
#[derive(Debug, Default)]
pub(crate) struct RollingWindow {
    buckets: VecDeque<(Instant, Bucket)>,
}

impl RollingWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one sample at `now`.
    pub fn record(&mut self, now: Instant, sample: Sample) {
        self.evict(now);
        let current = self
            .buckets
            .back()
            .is_some_and(|(start, _)| now.saturating_duration_since(*start) < BUCKET_WIDTH);
        if !current {
            self.buckets.push_back((now, Bucket::default()));
        }
        if let Some((_, bucket)) = self.buckets.back_mut() {
            match sample {
                Sample::Success => bucket.successes += 1,
                Sample::Failure => bucket.failures += 1,
                Sample::Rejection => bucket.rejections += 1,
            }
        }
    }

    /// Sums the buckets still inside the window at `now`.
    pub fn health(&mut self, now: Instant) -> Health {
        self.evict(now);
        self.buckets
            .iter()
            .fold(Health { requests: 0, errors: 0 }, |acc, (_, b)| Health {
                requests: acc.requests + b.successes + b.failures + b.rejections,
                errors: acc.errors + b.failures + b.rejections,
            })
    }

    /// Forgets everything.
    pub fn reset(&mut self) {
        self.buckets.clear();
    }

    fn evict(&mut self, now: Instant) {
        while let Some((start, _)) = self.buckets.front() {
            if now.saturating_duration_since(*start) >= WINDOW {
                self.buckets.pop_front();
            } else {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_errors_and_requests() {
        let now = Instant::now();
        let mut w = RollingWindow::new();
        w.record(now, Sample::Success);
        w.record(now, Sample::Failure);
        w.record(now + Duration::from_millis(1500), Sample::Rejection);
        w.record(now + Duration::from_millis(1600), Sample::Failure);

        let h = w.health(now + Duration::from_secs(2));
        assert_eq!(h, Health { requests: 4, errors: 3 });
        assert_eq!(h.error_percent(), 75);
    }

    #[test]
    fn samples_within_a_second_share_a_bucket() {
        let now = Instant::now();
        let mut w = RollingWindow::new();
        w.record(now, Sample::Success);
        w.record(now + Duration::from_millis(999), Sample::Failure);
        assert_eq!(w.buckets.len(), 1);

        w.record(now + Duration::from_millis(1000), Sample::Success);
        assert_eq!(w.buckets.len(), 2);
        assert_eq!(w.health(now + Duration::from_millis(1000)).requests, 3);
    }

    #[test]
    fn old_buckets_fall_out_of_the_window() {
        let now = Instant::now();
        let mut w = RollingWindow::new();
        w.record(now, Sample::Failure);
        w.record(now + Duration::from_secs(5), Sample::Success);

        assert_eq!(w.health(now + Duration::from_secs(9)).requests, 2);
        assert_eq!(w.health(now + Duration::from_secs(10)).requests, 1);
        assert_eq!(w.health(now + Duration::from_secs(16)).requests, 0);
    }

    #[test]
    fn reset_clears_and_empty_is_healthy() {
        let now = Instant::now();
        let mut w = RollingWindow::new();
        w.record(now, Sample::Failure);
        w.reset();

        let h = w.health(now);
        assert_eq!(h.requests, 0);
        assert_eq!(h.error_percent(), 0);
    }
}
