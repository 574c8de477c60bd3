//! SimilarityIndex: embed, store, and rank items across named collections.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use rayon::prelude::*;
use tracing::{debug, info};
use triage_core::config::SimilarityConfig;
use triage_core::constants::{MAX_COLLECTION_NAME_LEN, MAX_INDEX_BATCH_SIZE};
use triage_core::errors::{InputError, ProviderError};
use triage_core::models::{EmbeddingVector, IndexItem, SimilarityMatch};
use triage_core::text;
use triage_core::traits::IEmbeddingProvider;
use triage_core::TriageResult;
use triage_embeddings::cache::QueryEmbeddingCache;

use crate::collection::{Collection, StoredItem};
use crate::cosine::cosine_similarity;

/// Collections at least this large are scored on the rayon pool.
const PARALLEL_SCAN_THRESHOLD: usize = 2_048;

/// Vector index over named collections.
///
/// Embedding calls run before any collection lock is taken. Searches score a
/// snapshot, so results depend only on the stored vectors and the query.
pub struct SimilarityIndex {
    provider: Arc<dyn IEmbeddingProvider>,
    collections: DashMap<String, Arc<Collection>>,
    query_cache: QueryEmbeddingCache,
    config: SimilarityConfig,
}

impl SimilarityIndex {
    pub fn new(provider: Arc<dyn IEmbeddingProvider>, config: SimilarityConfig) -> Self {
        Self {
            provider,
            collections: DashMap::new(),
            query_cache: QueryEmbeddingCache::new(config.query_cache_size),
            config,
        }
    }

    /// Embed and store `items`, replacing any existing entries with the same id.
    ///
    /// Returns the number of distinct ids written.
    pub async fn index(&self, collection: &str, items: Vec<IndexItem>) -> TriageResult<usize> {
        self.index_with_deadline(collection, items, self.config.embedding_timeout())
            .await
    }

    pub async fn index_with_deadline(
        &self,
        collection: &str,
        items: Vec<IndexItem>,
        deadline: Duration,
    ) -> TriageResult<usize> {
        validate_collection_name(collection)?;
        if items.len() > MAX_INDEX_BATCH_SIZE {
            return Err(InputError::InvalidArgument {
                name: "items".to_string(),
                reason: format!(
                    "batch of {} exceeds the limit of {MAX_INDEX_BATCH_SIZE}",
                    items.len()
                ),
            }
            .into());
        }
        for item in &items {
            if item.id.trim().is_empty() {
                return Err(InputError::EmptyText {
                    field: "id".to_string(),
                }
                .into());
            }
            if item.text.trim().is_empty() {
                return Err(InputError::EmptyText {
                    field: "text".to_string(),
                }
                .into());
            }
        }
        let items = dedup_last_wins(items);
        if items.is_empty() {
            return Ok(0);
        }

        let texts: Vec<String> = items.iter().map(|i| text::normalize(&i.text)).collect();
        let vectors = self.embed_batch(&texts, deadline).await?;

        let stored: Vec<StoredItem> = items
            .into_iter()
            .zip(texts.iter().zip(vectors))
            .map(|(item, (normalized, vector))| StoredItem {
                embedding: EmbeddingVector {
                    id: item.id,
                    vector,
                    source_hash: text::content_hash(normalized),
                },
                metadata: item.metadata,
            })
            .collect();
        let written = stored.len();

        let target = Arc::clone(
            self.collections
                .entry(collection.to_string())
                .or_insert_with(|| Arc::new(Collection::new(collection)))
                .value(),
        );
        let replaced = target.upsert(stored);
        info!(collection, written, replaced, "collection indexed");
        Ok(written)
    }

    /// Top-`top_k` items of `collection` scoring at least `min_score` against `query`.
    ///
    /// An unknown collection has no members and yields an empty result.
    pub async fn search(
        &self,
        collection: &str,
        query: &str,
        top_k: usize,
        min_score: f64,
    ) -> TriageResult<Vec<SimilarityMatch>> {
        self.search_with_deadline(
            collection,
            query,
            top_k,
            min_score,
            self.config.embedding_timeout(),
        )
        .await
    }

    pub async fn search_with_deadline(
        &self,
        collection: &str,
        query: &str,
        top_k: usize,
        min_score: f64,
        deadline: Duration,
    ) -> TriageResult<Vec<SimilarityMatch>> {
        validate_collection_name(collection)?;
        validate_query(query)?;
        validate_top_k(top_k)?;
        validate_min_score(min_score)?;

        let Some(target) = self.collection(collection) else {
            debug!(collection, "search on unknown collection");
            return Ok(Vec::new());
        };
        let vector = self.embed_query(query, deadline).await?;
        Ok(rank(&target, &vector, top_k, min_score))
    }

    /// Search every named collection for probable duplicates of `text`.
    ///
    /// The query is embedded once. Each collection contributes at most
    /// `search_top_k` hits; the merged list is ordered by score, then
    /// collection, then id.
    pub async fn duplicate_check<S: AsRef<str>>(
        &self,
        text: &str,
        collections: &[S],
        min_score: f64,
    ) -> TriageResult<Vec<SimilarityMatch>> {
        self.duplicate_check_with_deadline(
            text,
            collections,
            min_score,
            self.config.embedding_timeout(),
        )
        .await
    }

    pub async fn duplicate_check_with_deadline<S: AsRef<str>>(
        &self,
        text: &str,
        collections: &[S],
        min_score: f64,
        deadline: Duration,
    ) -> TriageResult<Vec<SimilarityMatch>> {
        validate_query(text)?;
        validate_min_score(min_score)?;
        let names: BTreeSet<&str> = collections.iter().map(AsRef::as_ref).collect();
        for name in &names {
            validate_collection_name(name)?;
        }

        let targets: Vec<Arc<Collection>> =
            names.iter().filter_map(|name| self.collection(name)).collect();
        if targets.is_empty() {
            return Ok(Vec::new());
        }

        let vector = self.embed_query(text, deadline).await?;
        let mut matches: Vec<SimilarityMatch> = targets
            .iter()
            .flat_map(|c| rank(c, &vector, self.config.search_top_k, min_score))
            .collect();
        matches.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.collection.cmp(&b.collection))
                .then_with(|| a.id.cmp(&b.id))
        });

        if !matches.is_empty() {
            info!(
                collections = names.len(),
                flagged = matches.len(),
                top_score = matches[0].score,
                "probable duplicates found"
            );
        }
        Ok(matches)
    }

    /// Remove every item from `collection`. The collection itself stays known.
    pub fn clear(&self, collection: &str) -> usize {
        let removed = self.collection(collection).map_or(0, |c| c.clear());
        info!(collection, removed, "collection cleared");
        removed
    }

    pub fn remove(&self, collection: &str, id: &str) -> bool {
        self.collection(collection).is_some_and(|c| c.remove(id))
    }

    pub fn collection_len(&self, collection: &str) -> usize {
        self.collection(collection).map_or(0, |c| c.len())
    }

    /// Known collection names, sorted.
    pub fn collections(&self) -> Vec<String> {
        let mut names: Vec<String> = self.collections.iter().map(|r| r.key().clone()).collect();
        names.sort();
        names
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn config(&self) -> &SimilarityConfig {
        &self.config
    }

    fn collection(&self, name: &str) -> Option<Arc<Collection>> {
        self.collections.get(name).map(|r| Arc::clone(r.value()))
    }

    async fn embed_query(&self, query: &str, deadline: Duration) -> Result<Vec<f32>, ProviderError> {
        let key = QueryEmbeddingCache::key(self.provider.name(), query);
        if let Some(vector) = self.query_cache.get(&key) {
            debug!("query embedding cache hit");
            return Ok(vector);
        }

        let normalized = text::normalize(query);
        let vector = tokio::time::timeout(deadline, self.provider.embed(&normalized))
            .await
            .map_err(|_| self.timeout_error(deadline))??;
        self.check_dimensions(&vector)?;
        self.query_cache.insert(key, vector.clone());
        Ok(vector)
    }

    async fn embed_batch(
        &self,
        texts: &[String],
        deadline: Duration,
    ) -> Result<Vec<Vec<f32>>, ProviderError> {
        let vectors = tokio::time::timeout(deadline, self.provider.embed_batch(texts))
            .await
            .map_err(|_| self.timeout_error(deadline))??;
        if vectors.len() != texts.len() {
            return Err(ProviderError::InvalidResponse {
                provider: self.provider.name().to_string(),
                reason: format!("{} embeddings for {} texts", vectors.len(), texts.len()),
            });
        }
        for vector in &vectors {
            self.check_dimensions(vector)?;
        }
        Ok(vectors)
    }

    fn check_dimensions(&self, vector: &[f32]) -> Result<(), ProviderError> {
        let expected = self.provider.dimensions();
        if vector.len() != expected {
            return Err(ProviderError::DimensionMismatch {
                expected,
                actual: vector.len(),
            });
        }
        Ok(())
    }

    fn timeout_error(&self, deadline: Duration) -> ProviderError {
        ProviderError::Timeout {
            provider: self.provider.name().to_string(),
            elapsed_ms: deadline.as_millis() as u64,
        }
    }
}

/// Score a snapshot of `collection` against `query`, best first, ties by id.
fn rank(
    collection: &Collection,
    query: &[f32],
    top_k: usize,
    min_score: f64,
) -> Vec<SimilarityMatch> {
    let snapshot = collection.snapshot();
    let mut hits: Vec<(f64, &StoredItem)> = if snapshot.len() >= PARALLEL_SCAN_THRESHOLD {
        snapshot
            .par_iter()
            .filter_map(|(_, item)| score_item(query, item, min_score))
            .collect()
    } else {
        snapshot
            .values()
            .filter_map(|item| score_item(query, item, min_score))
            .collect()
    };

    hits.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.id().cmp(b.1.id())));
    hits.truncate(top_k);
    hits.into_iter()
        .map(|(score, item)| SimilarityMatch {
            collection: collection.name().to_string(),
            id: item.id().to_string(),
            score,
            metadata: item.metadata.clone(),
        })
        .collect()
}

fn score_item<'a>(
    query: &[f32],
    item: &'a StoredItem,
    min_score: f64,
) -> Option<(f64, &'a StoredItem)> {
    let score = cosine_similarity(query, &item.embedding.vector);
    (score >= min_score).then_some((score, item))
}

/// Collapse repeated ids, keeping the last occurrence in first-seen position.
fn dedup_last_wins(items: Vec<IndexItem>) -> Vec<IndexItem> {
    let mut position: HashMap<String, usize> = HashMap::with_capacity(items.len());
    let mut unique: Vec<IndexItem> = Vec::with_capacity(items.len());
    for item in items {
        match position.get(&item.id) {
            Some(&i) => unique[i] = item,
            None => {
                position.insert(item.id.clone(), unique.len());
                unique.push(item);
            }
        }
    }
    unique
}

fn validate_collection_name(name: &str) -> Result<(), InputError> {
    if name.trim().is_empty() {
        return Err(InputError::EmptyText {
            field: "collection".to_string(),
        });
    }
    if name.len() > MAX_COLLECTION_NAME_LEN {
        return Err(InputError::InvalidArgument {
            name: "collection".to_string(),
            reason: format!("longer than {MAX_COLLECTION_NAME_LEN} bytes"),
        });
    }
    Ok(())
}

fn validate_query(query: &str) -> Result<(), InputError> {
    if query.trim().is_empty() {
        return Err(InputError::EmptyText {
            field: "query".to_string(),
        });
    }
    Ok(())
}

fn validate_top_k(top_k: usize) -> Result<(), InputError> {
    if top_k == 0 {
        return Err(InputError::InvalidArgument {
            name: "top_k".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn validate_min_score(min_score: f64) -> Result<(), InputError> {
    if !(-1.0..=1.0).contains(&min_score) {
        return Err(InputError::InvalidArgument {
            name: "min_score".to_string(),
            reason: format!("{min_score} is outside [-1, 1]"),
        });
    }
    Ok(())
}
