//! # triage-embeddings
//!
//! Text → vector providers for the similarity index.
//!
//! - `providers::HashedEmbedder`: deterministic feature hashing, no network
//! - `providers::ApiEmbeddingProvider`: OpenAI-compatible embeddings endpoint
//! - `cache::QueryEmbeddingCache`: moka cache of query vectors by content hash
//! - `http`: JSON POST with bounded retry, shared with the semantic provider

pub mod cache;
pub mod http;
pub mod providers;

use std::sync::Arc;

use triage_core::config::EmbeddingConfig;
use triage_core::errors::ConfigError;
use triage_core::traits::IEmbeddingProvider;

pub use cache::QueryEmbeddingCache;
pub use providers::{ApiEmbeddingProvider, HashedEmbedder};

/// Build the embedding provider selected by `config.provider`.
///
/// The API provider reads its key from the environment variable named by
/// `config.api_key_env`; a missing key is a configuration error.
pub fn create_provider(config: &EmbeddingConfig) -> Result<Arc<dyn IEmbeddingProvider>, ConfigError> {
    match config.provider.as_str() {
        "hashed" => Ok(Arc::new(HashedEmbedder::new(config.dimensions))),
        "api" => {
            let api_key = std::env::var(&config.api_key_env).map_err(|_| {
                ConfigError::ValidationFailed {
                    field: "embedding.api_key_env".to_string(),
                    message: format!("environment variable {} is not set", config.api_key_env),
                }
            })?;
            let provider = ApiEmbeddingProvider::new(
                &config.endpoint,
                &config.model,
                api_key,
                config.dimensions,
            )
            .map_err(|e| ConfigError::ValidationFailed {
                field: "embedding".to_string(),
                message: e.to_string(),
            })?;
            Ok(Arc::new(provider))
        }
        other => Err(ConfigError::ValidationFailed {
            field: "embedding.provider".to_string(),
            message: format!("unknown provider {other:?}"),
        }),
    }
}
