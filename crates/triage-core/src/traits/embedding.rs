use async_trait::async_trait;

use crate::errors::ProviderError;

/// External text-embedding provider.
///
/// Must be deterministic for a fixed (text, model version) pair.
#[async_trait]
pub trait IEmbeddingProvider: Send + Sync {
    /// Embed a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError>;

    /// Embed a batch of texts. Output order matches input order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ProviderError>;

    /// The dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;

    /// Human-readable provider name, including the model version.
    fn name(&self) -> &str;
}
