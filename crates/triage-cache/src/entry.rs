use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use triage_core::models::ClassificationResult;

use crate::key::CacheKey;

/// Age-derived state of a cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Younger than its TTL; served directly under cache-first.
    Fresh,
    /// Past its TTL but within stale retention; served only when the provider fails.
    Stale,
    /// Past stale retention. Still the last-resort answer when the provider
    /// fails, until overwritten or removed by `purge_expired`.
    Expired,
}

/// One cached classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub key: CacheKey,
    pub value: ClassificationResult,
    pub created_at: DateTime<Utc>,
    pub ttl_secs: u64,
}

impl CacheEntry {
    pub fn new(key: CacheKey, value: ClassificationResult, ttl_secs: u64) -> Self {
        Self {
            key,
            value,
            created_at: Utc::now(),
            ttl_secs,
        }
    }

    /// Freshness at `now`. Entries dated in the future count as fresh.
    pub fn freshness(&self, now: DateTime<Utc>, stale_retention_secs: u64) -> Freshness {
        let age = now.signed_duration_since(self.created_at);
        let ttl = Duration::seconds(clamp_secs(self.ttl_secs));
        let retention = Duration::seconds(clamp_secs(stale_retention_secs));

        if age < ttl {
            return Freshness::Fresh;
        }
        match ttl.checked_add(&retention) {
            Some(limit) if age >= limit => Freshness::Expired,
            _ => Freshness::Stale,
        }
    }
}

fn clamp_secs(secs: u64) -> i64 {
    // chrono durations overflow well before i64::MAX seconds.
    secs.min(i64::MAX as u64 / 1_000) as i64
}
