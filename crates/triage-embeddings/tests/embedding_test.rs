//! End-to-end checks of the configured embedding provider.

use triage_core::config::EmbeddingConfig;
use triage_core::traits::IEmbeddingProvider;
use triage_embeddings::{create_provider, HashedEmbedder, QueryEmbeddingCache};

fn cosine(a: &[f32], b: &[f32]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| *x as f64 * *y as f64).sum();
    let na: f64 = a.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    let nb: f64 = b.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    dot / (na * nb)
}

#[tokio::test]
async fn identical_text_embeds_identically() {
    let provider = create_provider(&EmbeddingConfig::default()).unwrap();
    let a = provider.embed("Azure OpenAI West Europe availability").await.unwrap();
    let b = provider.embed("azure openai west europe availability").await.unwrap();
    assert_eq!(a, b);
    assert!((cosine(&a, &b) - 1.0).abs() < 1e-6);
}

#[tokio::test]
async fn dimensions_follow_config() {
    let config = EmbeddingConfig {
        dimensions: 64,
        ..EmbeddingConfig::default()
    };
    let provider = create_provider(&config).unwrap();
    let v = provider.embed("quota").await.unwrap();
    assert_eq!(v.len(), 64);
    assert_eq!(provider.dimensions(), 64);
}

#[test]
fn cached_vector_round_trips_through_query_cache() {
    let embedder = HashedEmbedder::new(32);
    let cache = QueryEmbeddingCache::new(100);
    let key = QueryEmbeddingCache::key("hashed-v1-32", "gdpr audit");
    cache.insert(key.clone(), embedder.vector("gdpr audit"));
    assert_eq!(cache.get(&key), Some(embedder.vector("GDPR audit")));
    assert_eq!(cache.len(), 1);
}
