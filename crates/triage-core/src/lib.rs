//! # triage-core
//!
//! Foundation crate for the triage engine.
//! Defines the closed taxonomy, data model, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod retry;
pub mod taxonomy;
pub mod text;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::TriageConfig;
pub use errors::{TriageError, TriageResult};
pub use models::{
    ClassificationRequest, ClassificationResult, Correction, PatternFeatures, ResultSource,
    SimilarityMatch,
};
pub use taxonomy::{BusinessImpact, Category, Intent};
