//! # triage-patterns
//!
//! Deterministic pattern-based pre-classifier. No external calls.
//!
//! Tokenizes case-insensitively, matches tokens and phrases against curated
//! lexicon groups per category, and scores each category as a normalized
//! weighted sum of matched groups. Ties go to the first-declared category.

pub mod classifier;
pub mod impact;
pub mod lexicon;
pub mod matcher;

pub use classifier::PatternClassifier;

/// Version of the lexicon and scoring rules.
///
/// Part of every response-cache key: bump it whenever a lexicon term, weight,
/// or scoring rule changes so cached results computed with the old features
/// are never served.
pub const FEATURE_SET_VERSION: u32 = 1;

/// Confidence reported when no category lexicon matches.
pub const DEFAULT_CONFIDENCE: f64 = 0.3;
