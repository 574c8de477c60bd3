//! Classification and duplicate-check counters.
//!
//! All counters are atomics, so one `ClassificationMetrics` is shared by every
//! concurrent caller without a lock.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How a classification was resolved, as seen by the metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationOutcome {
    CacheHit,
    Semantic,
    /// Provider failed; an entry within its TTL was served.
    CacheFallback,
    /// Provider failed; an entry past its TTL was served.
    StaleFallback,
    PatternFallback,
}

impl ClassificationOutcome {
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            Self::CacheFallback | Self::StaleFallback | Self::PatternFallback
        )
    }
}

#[derive(Debug, Default)]
pub struct ClassificationMetrics {
    total: AtomicU64,
    cache_hits: AtomicU64,
    stale_hits: AtomicU64,
    cache_fallbacks: AtomicU64,
    semantic_calls: AtomicU64,
    pattern_fallbacks: AtomicU64,
    agreements: AtomicU64,
    provider_failures: AtomicU64,
    latency_us_total: AtomicU64,
    duplicate_checks: AtomicU64,
    duplicates_flagged: AtomicU64,
}

impl ClassificationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one finished classification.
    pub fn record_classification(
        &self,
        outcome: ClassificationOutcome,
        agreement: bool,
        elapsed: Duration,
    ) {
        self.total.fetch_add(1, Ordering::Relaxed);
        let counter = match outcome {
            ClassificationOutcome::CacheHit => &self.cache_hits,
            ClassificationOutcome::Semantic => &self.semantic_calls,
            ClassificationOutcome::CacheFallback => &self.cache_fallbacks,
            ClassificationOutcome::StaleFallback => &self.stale_hits,
            ClassificationOutcome::PatternFallback => &self.pattern_fallbacks,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        if outcome.is_provider_failure() {
            self.provider_failures.fetch_add(1, Ordering::Relaxed);
        }
        if agreement {
            self.agreements.fetch_add(1, Ordering::Relaxed);
        }
        self.latency_us_total
            .fetch_add(elapsed.as_micros() as u64, Ordering::Relaxed);
    }

    /// Record one duplicate check and how many matches it flagged.
    pub fn record_duplicate_check(&self, flagged: usize) {
        self.duplicate_checks.fetch_add(1, Ordering::Relaxed);
        self.duplicates_flagged
            .fetch_add(flagged as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let total = self.total.load(Ordering::Relaxed);
        let cache_hits = self.cache_hits.load(Ordering::Relaxed);
        let agreements = self.agreements.load(Ordering::Relaxed);
        let pattern_fallbacks = self.pattern_fallbacks.load(Ordering::Relaxed);
        let latency_us_total = self.latency_us_total.load(Ordering::Relaxed);
        MetricsSnapshot {
            total,
            cache_hits,
            stale_hits: self.stale_hits.load(Ordering::Relaxed),
            cache_fallbacks: self.cache_fallbacks.load(Ordering::Relaxed),
            semantic_calls: self.semantic_calls.load(Ordering::Relaxed),
            pattern_fallbacks,
            agreements,
            provider_failures: self.provider_failures.load(Ordering::Relaxed),
            duplicate_checks: self.duplicate_checks.load(Ordering::Relaxed),
            duplicates_flagged: self.duplicates_flagged.load(Ordering::Relaxed),
            // Pattern-only answers have no semantic verdict to agree with.
            agreement_rate: ratio(agreements, total.saturating_sub(pattern_fallbacks)),
            cache_hit_rate: ratio(cache_hits, total),
            mean_latency_ms: ratio(latency_us_total, total) / 1_000.0,
        }
    }
}

fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub total: u64,
    pub cache_hits: u64,
    pub stale_hits: u64,
    pub cache_fallbacks: u64,
    pub semantic_calls: u64,
    pub pattern_fallbacks: u64,
    pub agreements: u64,
    pub provider_failures: u64,
    pub duplicate_checks: u64,
    pub duplicates_flagged: u64,
    pub agreement_rate: f64,
    pub cache_hit_rate: f64,
    pub mean_latency_ms: f64,
}

impl MetricsSnapshot {
    /// Share of classifications that took a fallback path.
    pub fn degraded_rate(&self) -> f64 {
        ratio(self.provider_failures, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_snapshot_has_zero_rates() {
        let snap = ClassificationMetrics::new().snapshot();
        assert_eq!(snap.total, 0);
        assert_eq!(snap.agreement_rate, 0.0);
        assert_eq!(snap.degraded_rate(), 0.0);
    }

    #[test]
    fn outcomes_land_in_their_counters() {
        let m = ClassificationMetrics::new();
        let ms = Duration::from_millis(2);
        m.record_classification(ClassificationOutcome::Semantic, true, ms);
        m.record_classification(ClassificationOutcome::CacheHit, true, ms);
        m.record_classification(ClassificationOutcome::StaleFallback, false, ms);
        m.record_classification(ClassificationOutcome::PatternFallback, false, ms);

        let snap = m.snapshot();
        assert_eq!(snap.total, 4);
        assert_eq!(snap.semantic_calls, 1);
        assert_eq!(snap.cache_hits, 1);
        assert_eq!(snap.stale_hits, 1);
        assert_eq!(snap.pattern_fallbacks, 1);
        assert_eq!(snap.provider_failures, 2);
        assert_eq!(snap.agreements, 2);
        assert!((snap.agreement_rate - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(snap.cache_hit_rate, 0.25);
        assert!((snap.mean_latency_ms - 2.0).abs() < 1e-9);
    }

    #[test]
    fn pattern_fallbacks_do_not_count_toward_agreement() {
        let m = ClassificationMetrics::new();
        let ms = Duration::from_millis(1);
        for _ in 0..5 {
            m.record_classification(ClassificationOutcome::PatternFallback, false, ms);
        }
        assert_eq!(m.snapshot().agreement_rate, 0.0);

        m.record_classification(ClassificationOutcome::Semantic, false, ms);
        m.record_classification(ClassificationOutcome::Semantic, true, ms);
        let snap = m.snapshot();
        assert_eq!(snap.total, 7);
        assert_eq!(snap.agreement_rate, 0.5);
    }

    #[test]
    fn duplicate_checks_accumulate() {
        let m = ClassificationMetrics::new();
        m.record_duplicate_check(0);
        m.record_duplicate_check(3);
        let snap = m.snapshot();
        assert_eq!(snap.duplicate_checks, 2);
        assert_eq!(snap.duplicates_flagged, 3);
    }

    #[test]
    fn snapshot_serializes() {
        let json = serde_json::to_value(ClassificationMetrics::new().snapshot()).unwrap();
        assert!(json.get("agreement_rate").is_some());
    }
}
