use async_trait::async_trait;

use crate::errors::ProviderError;

/// External natural-language classification provider.
///
/// Returns loosely-typed JSON; callers validate it against the closed taxonomy.
#[async_trait]
pub trait ISemanticProvider: Send + Sync {
    /// Complete `prompt`, constraining the answer to `output_schema`.
    async fn complete(
        &self,
        prompt: &str,
        output_schema: &serde_json::Value,
    ) -> Result<serde_json::Value, ProviderError>;

    /// Human-readable provider name.
    fn name(&self) -> &str;
}
