//! Feature-hashing embedder.
//!
//! Projects unigrams and adjacent-token bigrams into fixed-dimension buckets
//! with a hash-derived sign, then L2-normalizes. No external dependencies, so
//! it works in air-gapped deployments. Identical canonical text always yields
//! an identical vector.

use std::collections::BTreeMap;

use async_trait::async_trait;
use triage_core::errors::ProviderError;
use triage_core::text;
use triage_core::traits::IEmbeddingProvider;

/// Relative weight of bigram features against unigrams.
const BIGRAM_WEIGHT: f32 = 0.5;

pub struct HashedEmbedder {
    dimensions: usize,
    name: String,
}

impl HashedEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
            name: format!("hashed-v1-{dimensions}"),
        }
    }

    /// FNV-1a over the feature bytes.
    fn fnv1a(feature: &str) -> u64 {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in feature.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        h
    }

    pub fn vector(&self, input: &str) -> Vec<f32> {
        let tokens = text::tokenize(input);
        let mut out = vec![0.0f32; self.dimensions];
        if tokens.is_empty() {
            return out;
        }

        let mut features: BTreeMap<String, f32> = BTreeMap::new();
        for token in &tokens {
            *features.entry(token.clone()).or_default() += 1.0;
        }
        for pair in tokens.windows(2) {
            *features.entry(format!("{} {}", pair[0], pair[1])).or_default() += BIGRAM_WEIGHT;
        }

        for (feature, weight) in &features {
            let h = Self::fnv1a(feature);
            let bucket = (h % self.dimensions as u64) as usize;
            let sign = if (h >> 63) == 0 { 1.0 } else { -1.0 };
            out[bucket] += sign * weight;
        }

        let norm: f32 = out.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut out {
                *v /= norm;
            }
        }
        out
    }
}

#[async_trait]
impl IEmbeddingProvider for HashedEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
        Ok(self.vector(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ProviderError> {
        Ok(texts.iter().map(|t| self.vector(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cosine(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b).map(|(x, y)| x * y).sum()
    }

    #[test]
    fn empty_text_is_zero_vector() {
        let v = HashedEmbedder::new(64).vector("  ");
        assert_eq!(v.len(), 64);
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn output_is_unit_norm() {
        let v = HashedEmbedder::new(256).vector("azure openai west europe availability");
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5, "expected unit norm, got {norm}");
    }

    #[test]
    fn case_and_spacing_do_not_matter() {
        let e = HashedEmbedder::new(128);
        assert_eq!(e.vector("SQL  MI quota"), e.vector("sql mi quota"));
    }

    #[test]
    fn word_order_matters_through_bigrams() {
        let e = HashedEmbedder::new(384);
        assert_ne!(e.vector("quota west"), e.vector("west quota"));
    }

    #[test]
    fn related_texts_are_closer() {
        let e = HashedEmbedder::new(384);
        let a = e.vector("azure openai quota increase west europe");
        let b = e.vector("azure openai quota increase east us");
        let c = e.vector("invoice pricing discount question");
        assert!(cosine(&a, &b) > cosine(&a, &c));
    }

    #[tokio::test]
    async fn batch_matches_individual() {
        let e = HashedEmbedder::new(128);
        let texts = vec!["hello world".to_string(), "quota limit".to_string()];
        let batch = e.embed_batch(&texts).await.unwrap();
        for (i, t) in texts.iter().enumerate() {
            assert_eq!(batch[i], e.embed(t).await.unwrap());
        }
    }
}
