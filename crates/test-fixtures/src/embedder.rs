//! Deterministic embedding provider for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use triage_core::errors::ProviderError;
use triage_core::text;
use triage_core::traits::IEmbeddingProvider;

/// Returns pinned vectors for known texts and a blake3-derived vector otherwise.
///
/// Lookup uses the normalized text, so casing and spacing do not matter.
pub struct KeyedEmbedder {
    dims: usize,
    pinned: HashMap<String, Vec<f32>>,
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl KeyedEmbedder {
    pub fn new(dims: usize) -> Self {
        Self {
            dims,
            pinned: HashMap::new(),
            calls: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
        }
    }

    /// Pin `text` to `vector`. Panics on a dimension mismatch.
    pub fn with(mut self, text: &str, vector: Vec<f32>) -> Self {
        assert_eq!(vector.len(), self.dims, "pinned vector has wrong dimensions");
        self.pinned.insert(text::normalize(text), vector);
        self
    }

    /// Make every following call fail with `QuotaExhausted`.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of texts embedded so far (a batch counts each text).
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn vector_for(&self, input: &str) -> Vec<f32> {
        let key = text::normalize(input);
        if let Some(v) = self.pinned.get(&key) {
            return v.clone();
        }
        let mut hasher = blake3::Hasher::new();
        hasher.update(key.as_bytes());
        let mut reader = hasher.finalize_xof();
        let mut bytes = vec![0u8; self.dims];
        reader.fill(&mut bytes);
        bytes.into_iter().map(|b| b as f32 / 255.0 - 0.5).collect()
    }
}

#[async_trait]
impl IEmbeddingProvider for KeyedEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ProviderError::QuotaExhausted {
                provider: self.name().to_string(),
            });
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.vector_for(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ProviderError> {
        let mut out = Vec::with_capacity(texts.len());
        for t in texts {
            out.push(self.embed(t).await?);
        }
        Ok(out)
    }

    fn dimensions(&self) -> usize {
        self.dims
    }

    fn name(&self) -> &str {
        "keyed-test"
    }
}
