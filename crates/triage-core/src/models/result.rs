use serde::{Deserialize, Serialize};

use crate::taxonomy::{BusinessImpact, Category, Intent};

/// Which path produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultSource {
    Cache,
    Pattern,
    Semantic,
}

/// Final classification handed back to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub category: Category,
    pub intent: Intent,
    pub confidence: f64,
    pub reasoning: String,
    pub source: ResultSource,
    /// Pattern and semantic classifiers chose the same category.
    pub agreement: bool,
    /// Served from an entry past its TTL because the provider failed.
    #[serde(default)]
    pub stale: bool,
    pub business_impact: BusinessImpact,
}

impl ClassificationResult {
    /// Same result relabelled as coming from the cache.
    pub fn as_cached(&self, stale: bool) -> Self {
        Self {
            source: ResultSource::Cache,
            stale,
            ..self.clone()
        }
    }
}
