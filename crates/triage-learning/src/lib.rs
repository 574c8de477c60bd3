//! # triage-learning
//!
//! In-context learning material for the semantic classifier.
//!
//! - `store`: append-only `CorrectionStore` with snapshot reads
//! - `similarity`: token-set Jaccard scoring

pub mod similarity;
pub mod store;

pub use similarity::jaccard;
pub use store::{CorrectionStore, ScoredCorrection};
