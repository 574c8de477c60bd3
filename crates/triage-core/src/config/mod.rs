pub mod defaults;
mod sections;
mod triage_config;

pub use sections::{
    CacheConfig, ClassifierConfig, EmbeddingConfig, LearningConfig, ObservabilityConfig,
    RefreshPolicy, SimilarityConfig, StorageConfig,
};
pub use triage_config::TriageConfig;
