//! Health reporting across the engine's subsystems.

pub mod reporter;
pub mod subsystem_checks;

pub use reporter::{HealthReport, HealthReporter, HealthSnapshot};
pub use subsystem_checks::{HealthStatus, SubsystemHealth};
