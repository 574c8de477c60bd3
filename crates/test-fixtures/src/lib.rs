//! Test fixtures for the triage workspace: golden scenario loader and mock providers.
//!
//! Golden files live under `golden/` in this crate and are deserialized into
//! the typed scenario structs below.

pub mod embedder;
pub mod providers;

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use triage_core::models::{IndexItem, Metadata};

pub use embedder::KeyedEmbedder;
pub use providers::{CountingProvider, FailingProvider, ScriptedProvider, SlowProvider};

/// Root directory of the golden data.
pub fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("golden")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// One pattern-classifier golden case.
#[derive(Debug, Clone, Deserialize)]
pub struct PatternScenario {
    pub name: String,
    pub title: String,
    pub description: String,
    pub impact: String,
    pub expected_category: String,
    #[serde(default)]
    pub min_confidence: Option<f64>,
    #[serde(default)]
    pub max_confidence: Option<f64>,
    #[serde(default)]
    pub expected_entities: Option<Vec<String>>,
    #[serde(default)]
    pub expected_impact: Option<String>,
}

/// A collection to index plus queries with their expected top hit.
#[derive(Debug, Clone, Deserialize)]
pub struct SimilarityCorpus {
    pub collection: String,
    pub items: Vec<CorpusItem>,
    pub queries: Vec<CorpusQuery>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorpusItem {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub metadata: Metadata,
}

impl From<CorpusItem> for IndexItem {
    fn from(item: CorpusItem) -> Self {
        IndexItem::new(item.id, item.text, item.metadata)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorpusQuery {
    pub text: String,
    pub top_id: String,
    pub top_score: f64,
}

pub fn pattern_scenarios() -> Vec<PatternScenario> {
    load_fixture("patterns/scenarios.json")
}

pub fn similarity_corpus() -> SimilarityCorpus {
    load_fixture("similarity/corpus.json")
}
