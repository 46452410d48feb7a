//! Metrics registry
//!
//! Counters only. Monotonic, reset on process start.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters for the inference service
///
/// All counters use Relaxed atomics; readers may observe slightly stale
/// values across counters.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Sessions started
    sessions_started: AtomicU64,
    /// Answers accepted into a session
    answers_accepted: AtomicU64,
    /// Sessions ending with a rule conclusion
    conclusions: AtomicU64,
    /// Sessions ending with no rule satisfied
    no_rule_outcomes: AtomicU64,
    /// Requests rejected with an error
    requests_rejected: AtomicU64,
    /// Automaton walks performed
    walks: AtomicU64,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_sessions_started(&self) {
        self.sessions_started.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_answers_accepted(&self) {
        self.answers_accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_conclusions(&self) {
        self.conclusions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_no_rule_outcomes(&self) {
        self.no_rule_outcomes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_requests_rejected(&self) {
        self.requests_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_walks(&self) {
        self.walks.fetch_add(1, Ordering::Relaxed);
    }

    /// Current values of every counter
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            sessions_started: self.sessions_started.load(Ordering::Relaxed),
            answers_accepted: self.answers_accepted.load(Ordering::Relaxed),
            conclusions: self.conclusions.load(Ordering::Relaxed),
            no_rule_outcomes: self.no_rule_outcomes.load(Ordering::Relaxed),
            requests_rejected: self.requests_rejected.load(Ordering::Relaxed),
            walks: self.walks.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub sessions_started: u64,
    pub answers_accepted: u64,
    pub conclusions: u64,
    pub no_rule_outcomes: u64,
    pub requests_rejected: u64,
    pub walks: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registry_is_zero() {
        let metrics = MetricsRegistry::new();
        assert_eq!(metrics.snapshot().sessions_started, 0);
        assert_eq!(metrics.snapshot().requests_rejected, 0);
    }

    #[test]
    fn test_increments() {
        let metrics = MetricsRegistry::new();
        metrics.increment_sessions_started();
        metrics.increment_answers_accepted();
        metrics.increment_answers_accepted();
        metrics.increment_conclusions();

        let snap = metrics.snapshot();
        assert_eq!(snap.sessions_started, 1);
        assert_eq!(snap.answers_accepted, 2);
        assert_eq!(snap.conclusions, 1);
        assert_eq!(snap.no_rule_outcomes, 0);
    }

    #[test]
    fn test_snapshot_serializes() {
        let metrics = MetricsRegistry::new();
        metrics.increment_walks();
        let json = serde_json::to_value(metrics.snapshot()).unwrap();
        assert_eq!(json["walks"], 1);
        assert_eq!(json["sessions_started"], 0);
    }
}
