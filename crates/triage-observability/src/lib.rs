//! # triage-observability
//!
//! Structured tracing setup and event types, lock-free classification
//! metrics, and per-subsystem health reporting.

pub mod health;
pub mod metrics;
pub mod tracing_setup;

pub use health::{HealthReport, HealthReporter, HealthSnapshot, HealthStatus, SubsystemHealth};
pub use metrics::{ClassificationMetrics, ClassificationOutcome, MetricsSnapshot};
pub use tracing_setup::{init_tracing, init_tracing_from_config, init_tracing_with_filter};
