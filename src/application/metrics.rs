//! Click metrics for the registry.
//!
//! Counts what the registry accepted and rejected, for monitoring spam
//! pressure across all flyers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Metrics tracking registry activity.
///
/// All metrics use atomic operations for thread-safe updates and reads.
/// Clones share the same counters.
///
/// Only clicks routed through the registry are counted; clicks added
/// directly on a detached `Flyer` are not.
#[derive(Debug, Clone)]
pub struct Metrics {
    inner: Arc<MetricsInner>,
}

#[derive(Debug, Default)]
struct MetricsInner {
    /// Clicks recorded in a flyer's history
    clicks_accepted: AtomicU64,
    /// Clicks rejected by a flyer's spam gate
    clicks_rejected: AtomicU64,
    /// Flyers successfully registered
    flyers_registered: AtomicU64,
}

impl Metrics {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner::default()),
        }
    }

    pub(crate) fn record_accepted(&self) {
        self.inner.clicks_accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rejected(&self) {
        self.inner.clicks_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_registration(&self) {
        self.inner.flyers_registered.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the total number of accepted clicks.
    pub fn clicks_accepted(&self) -> u64 {
        self.inner.clicks_accepted.load(Ordering::Relaxed)
    }

    /// Get the total number of clicks rejected as spam.
    pub fn clicks_rejected(&self) -> u64 {
        self.inner.clicks_rejected.load(Ordering::Relaxed)
    }

    /// Get the total number of registered flyers.
    pub fn flyers_registered(&self) -> u64 {
        self.inner.flyers_registered.load(Ordering::Relaxed)
    }

    /// Get a snapshot of all metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            clicks_accepted: self.clicks_accepted(),
            clicks_rejected: self.clicks_rejected(),
            flyers_registered: self.flyers_registered(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time snapshot of metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub clicks_accepted: u64,
    pub clicks_rejected: u64,
    pub flyers_registered: u64,
}

impl MetricsSnapshot {
    /// Calculate the spam rejection rate (0.0 to 1.0).
    ///
    /// Returns 0.0 if no clicks have been processed.
    pub fn rejection_rate(&self) -> f64 {
        let total = self.total_clicks();
        if total == 0 {
            0.0
        } else {
            self.clicks_rejected as f64 / total as f64
        }
    }

    /// Get the total number of clicks processed (accepted + rejected).
    pub fn total_clicks(&self) -> u64 {
        self.clicks_accepted.saturating_add(self.clicks_rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_initial_state() {
        let metrics = Metrics::new();
        assert_eq!(metrics.clicks_accepted(), 0);
        assert_eq!(metrics.clicks_rejected(), 0);
        assert_eq!(metrics.flyers_registered(), 0);
    }

    #[test]
    fn test_snapshot() {
        let metrics = Metrics::new();
        metrics.record_accepted();
        metrics.record_accepted();
        metrics.record_rejected();
        metrics.record_registration();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.clicks_accepted, 2);
        assert_eq!(snapshot.clicks_rejected, 1);
        assert_eq!(snapshot.flyers_registered, 1);
        assert_eq!(snapshot.total_clicks(), 3);
    }

    #[test]
    fn test_rejection_rate() {
        let metrics = Metrics::new();
        assert_eq!(metrics.snapshot().rejection_rate(), 0.0);

        metrics.record_accepted();
        metrics.record_rejected();
        assert!((metrics.snapshot().rejection_rate() - 0.5).abs() < f64::EPSILON);

        metrics.record_rejected();
        metrics.record_rejected();
        assert!((metrics.snapshot().rejection_rate() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_metrics_clone_shares_counters() {
        let metrics1 = Metrics::new();
        metrics1.record_accepted();

        let metrics2 = metrics1.clone();
        metrics2.record_accepted();

        assert_eq!(metrics1.clicks_accepted(), 2);
        assert_eq!(metrics2.clicks_accepted(), 2);
    }

    #[test]
    fn test_concurrent_updates() {
        use std::thread;

        let metrics = Metrics::new();
        let mut handles = vec![];

        for _ in 0..10 {
            let m = metrics.clone();
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    m.record_accepted();
                    m.record_rejected();
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(metrics.clicks_accepted(), 1000);
        assert_eq!(metrics.clicks_rejected(), 1000);
    }
}
