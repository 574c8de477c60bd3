//! Query-embedding cache using moka.
//!
//! Keys are blake3 hashes of (provider name, normalized text), so switching
//! providers never serves a vector from the wrong model.

use moka::sync::Cache;
use triage_core::text;

pub struct QueryEmbeddingCache {
    cache: Cache<String, Vec<f32>>,
}

impl QueryEmbeddingCache {
    pub fn new(max_entries: u64) -> Self {
        Self {
            cache: Cache::builder().max_capacity(max_entries).build(),
        }
    }

    pub fn key(provider: &str, query: &str) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(provider.as_bytes());
        hasher.update(&[0]);
        hasher.update(text::normalize(query).as_bytes());
        hasher.finalize().to_hex().to_string()
    }

    pub fn get(&self, key: &str) -> Option<Vec<f32>> {
        self.cache.get(key)
    }

    pub fn insert(&self, key: String, embedding: Vec<f32>) {
        self.cache.insert(key, embedding);
    }

    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let cache = QueryEmbeddingCache::new(10);
        let key = QueryEmbeddingCache::key("hashed", "Quota  West");
        cache.insert(key.clone(), vec![1.0, 2.0]);
        assert_eq!(cache.get(&key), Some(vec![1.0, 2.0]));
        assert_eq!(key, QueryEmbeddingCache::key("hashed", "quota west"));
    }

    #[test]
    fn provider_partitions_keys() {
        assert_ne!(
            QueryEmbeddingCache::key("a", "text"),
            QueryEmbeddingCache::key("b", "text")
        );
    }

    #[test]
    fn clear_empties_cache() {
        let cache = QueryEmbeddingCache::new(10);
        cache.insert("a".to_string(), vec![1.0]);
        cache.clear();
        assert_eq!(cache.get("a"), None);
    }
}
