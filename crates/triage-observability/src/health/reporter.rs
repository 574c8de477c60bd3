//! Aggregate health report generation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::subsystem_checks::{HealthStatus, SubsystemChecker, SubsystemHealth};
use crate::metrics::MetricsSnapshot;

/// Snapshot of subsystem data used to build a health report.
#[derive(Debug, Clone, Default)]
pub struct HealthSnapshot {
    pub semantic_provider: String,
    pub embedding_provider: String,
    pub cache_entries: u64,
    pub cache_capacity: u64,
    pub corrections: usize,
    /// (collection, item count), sorted by name.
    pub collections: Vec<(String, usize)>,
    /// Degradation events retained and not yet drained.
    pub pending_degradations: usize,
    /// Degradations since startup, including dropped and drained events.
    pub degradations_total: u64,
    pub metrics: MetricsSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub overall_status: HealthStatus,
    pub subsystems: Vec<SubsystemHealth>,
    pub metrics: MetricsSnapshot,
    pub pending_degradations: usize,
    pub degradations_total: u64,
    pub generated_at: DateTime<Utc>,
}

/// Builds a [`HealthReport`] from a snapshot and subsystem checks.
pub struct HealthReporter;

impl HealthReporter {
    pub fn build(snapshot: &HealthSnapshot) -> HealthReport {
        let subsystems = SubsystemChecker::check_all(snapshot);
        let overall_status = Self::derive_overall(&subsystems);

        HealthReport {
            overall_status,
            subsystems,
            metrics: snapshot.metrics.clone(),
            pending_degradations: snapshot.pending_degradations,
            degradations_total: snapshot.degradations_total,
            generated_at: Utc::now(),
        }
    }

    /// Derive overall status: unhealthy if any subsystem is unhealthy,
    /// degraded if any is degraded, otherwise healthy.
    fn derive_overall(subsystems: &[SubsystemHealth]) -> HealthStatus {
        let mut worst = HealthStatus::Healthy;
        for s in subsystems {
            match s.status {
                HealthStatus::Unhealthy => return HealthStatus::Unhealthy,
                HealthStatus::Degraded => worst = HealthStatus::Degraded,
                HealthStatus::Healthy => {}
            }
        }
        worst
    }
}
