use serde::{Deserialize, Serialize};

/// Free-form metadata attached to an indexed item.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// An item submitted for indexing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexItem {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub metadata: Metadata,
}

impl IndexItem {
    pub fn new(id: impl Into<String>, text: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            metadata,
        }
    }
}

/// A stored embedding with the hash of the text it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingVector {
    pub id: String,
    pub vector: Vec<f32>,
    pub source_hash: String,
}

/// One search hit. `score` is the raw cosine similarity in `[-1, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatch {
    pub collection: String,
    pub id: String,
    pub score: f64,
    pub metadata: Metadata,
}
