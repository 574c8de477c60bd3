//! OpenAI-compatible embeddings endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use triage_core::errors::ProviderError;
use triage_core::retry::RetryPolicy;
use triage_core::traits::IEmbeddingProvider;

use crate::http;

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
    dimensions: usize,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingDatum>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingDatum {
    index: usize,
    embedding: Vec<f32>,
}

/// Remote embedding provider. Every returned vector is checked against the
/// configured dimensionality.
pub struct ApiEmbeddingProvider {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    dimensions: usize,
    retry: RetryPolicy,
    name: String,
}

impl ApiEmbeddingProvider {
    pub fn new(
        endpoint: &str,
        model: &str,
        api_key: String,
        dimensions: usize,
    ) -> Result<Self, ProviderError> {
        let name = format!("api:{model}");
        Ok(Self {
            client: http::build_client(&name)?,
            endpoint: endpoint.to_string(),
            model: model.to_string(),
            api_key,
            dimensions,
            retry: RetryPolicy::default(),
            name,
        })
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn parse(&self, body: serde_json::Value, expected: usize) -> Result<Vec<Vec<f32>>, ProviderError> {
        let mut response: EmbeddingResponse =
            serde_json::from_value(body).map_err(|e| ProviderError::InvalidResponse {
                provider: self.name.clone(),
                reason: e.to_string(),
            })?;
        if response.data.len() != expected {
            return Err(ProviderError::InvalidResponse {
                provider: self.name.clone(),
                reason: format!("expected {expected} embeddings, got {}", response.data.len()),
            });
        }
        response.data.sort_by_key(|d| d.index);
        response
            .data
            .into_iter()
            .map(|d| {
                if d.embedding.len() != self.dimensions {
                    return Err(ProviderError::DimensionMismatch {
                        expected: self.dimensions,
                        actual: d.embedding.len(),
                    });
                }
                Ok(d.embedding)
            })
            .collect()
    }
}

#[async_trait]
impl IEmbeddingProvider for ApiEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
        let mut batch = self.embed_batch(&[text.to_string()]).await?;
        batch.pop().ok_or_else(|| ProviderError::InvalidResponse {
            provider: self.name.clone(),
            reason: "empty embedding batch".to_string(),
        })
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ProviderError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let request = EmbeddingRequest {
            model: &self.model,
            input: texts,
            dimensions: self.dimensions,
        };
        let body = http::post_json(
            &self.client,
            &self.name,
            &self.endpoint,
            &self.api_key,
            &request,
            &self.retry,
        )
        .await?;
        self.parse(body, texts.len())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.name
    }
}
