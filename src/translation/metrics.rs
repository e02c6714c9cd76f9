//! Translation metrics and observability.
//!
//! Each comparator owns its own counters, so concurrent comparators never
//! share state. Counters only describe what happened; no score depends on them.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters for translation attempts made by one comparator.
#[derive(Debug, Default)]
pub struct TranslationMetrics {
    /// Number of calls made to the translation service
    attempts: AtomicUsize,

    /// Number of calls that produced a usable translation
    successes: AtomicUsize,

    /// Number of calls that failed, timed out, or returned unusable text
    failures: AtomicUsize,

    /// Number of fields compared without calling the service at all
    skips: AtomicUsize,
}

impl TranslationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_attempt(&self) {
        self.attempts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_success(&self) {
        self.successes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_skip(&self) {
        self.skips.fetch_add(1, Ordering::Relaxed);
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::Relaxed)
    }

    pub fn successes(&self) -> usize {
        self.successes.load(Ordering::Relaxed)
    }

    pub fn failures(&self) -> usize {
        self.failures.load(Ordering::Relaxed)
    }

    pub fn skips(&self) -> usize {
        self.skips.load(Ordering::Relaxed)
    }

    /// Snapshot of the counters.
    ///
    /// # Returns
    /// A `MetricsReport` with the current counts and the success rate as a
    /// percentage of attempts (0.0 when nothing was attempted).
    pub fn report(&self) -> MetricsReport {
        let attempts = self.attempts();
        let successes = self.successes();
        let success_rate = if attempts > 0 {
            (successes as f64 / attempts as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            attempts,
            successes,
            failures: self.failures(),
            skips: self.skips(),
            success_rate,
        }
    }
}

/// Metrics report containing translation statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    pub attempts: usize,
    pub successes: usize,
    pub failures: usize,
    pub skips: usize,

    /// Successful attempts as a percentage (0-100)
    pub success_rate: f64,
}
