//! Per-subsystem health checks: semantic provider, response cache,
//! correction log, similarity index. Each returns healthy | degraded | unhealthy.

use serde::{Deserialize, Serialize};

use super::reporter::HealthSnapshot;

/// Minimum classifications before fallback rates are judged.
const MIN_SAMPLE: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsystemHealth {
    pub name: String,
    pub status: HealthStatus,
    pub message: Option<String>,
}

/// Runs health checks against each subsystem.
pub struct SubsystemChecker;

impl SubsystemChecker {
    pub fn check_all(snapshot: &HealthSnapshot) -> Vec<SubsystemHealth> {
        vec![
            Self::check_semantic(snapshot),
            Self::check_cache(snapshot),
            Self::check_corrections(snapshot),
            Self::check_similarity(snapshot),
        ]
    }

    /// Semantic provider: degraded if ≥25% of classifications fell back,
    /// unhealthy if ≥90%.
    fn check_semantic(snapshot: &HealthSnapshot) -> SubsystemHealth {
        let metrics = &snapshot.metrics;
        let rate = metrics.degraded_rate();
        let (status, message) = if metrics.total < MIN_SAMPLE {
            (HealthStatus::Healthy, None)
        } else if rate >= 0.90 {
            (
                HealthStatus::Unhealthy,
                Some(format!("{:.0}% of classifications fell back", rate * 100.0)),
            )
        } else if rate >= 0.25 {
            (
                HealthStatus::Degraded,
                Some(format!("{:.0}% of classifications fell back", rate * 100.0)),
            )
        } else {
            (HealthStatus::Healthy, None)
        };
        SubsystemHealth {
            name: format!("semantic:{}", snapshot.semantic_provider),
            status,
            message,
        }
    }

    /// Cache: degraded when full, since new results start evicting old ones.
    fn check_cache(snapshot: &HealthSnapshot) -> SubsystemHealth {
        let (status, message) =
            if snapshot.cache_capacity > 0 && snapshot.cache_entries >= snapshot.cache_capacity {
                (
                    HealthStatus::Degraded,
                    Some(format!("cache at capacity ({})", snapshot.cache_capacity)),
                )
            } else {
                (HealthStatus::Healthy, None)
            };
        SubsystemHealth {
            name: "response_cache".into(),
            status,
            message,
        }
    }

    fn check_corrections(snapshot: &HealthSnapshot) -> SubsystemHealth {
        SubsystemHealth {
            name: "corrections".into(),
            status: HealthStatus::Healthy,
            message: Some(format!("{} corrections", snapshot.corrections)),
        }
    }

    fn check_similarity(snapshot: &HealthSnapshot) -> SubsystemHealth {
        let items: usize = snapshot.collections.iter().map(|(_, n)| n).sum();
        SubsystemHealth {
            name: format!("similarity:{}", snapshot.embedding_provider),
            status: HealthStatus::Healthy,
            message: Some(format!(
                "{} collections, {items} items",
                snapshot.collections.len()
            )),
        }
    }
}
