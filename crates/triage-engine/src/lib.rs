//! # triage-engine
//!
//! `HybridOrchestrator` sequences the pattern classifier, the correction log,
//! and the semantic classifier into one classification call. `TriageEngine`
//! owns every store and exposes the caller-facing API: classification,
//! indexing, similarity search, duplicate checks, corrections, metrics, and
//! health.

pub mod engine;
pub mod orchestrator;

pub use engine::TriageEngine;
pub use orchestrator::{HybridOrchestrator, Orchestration};
