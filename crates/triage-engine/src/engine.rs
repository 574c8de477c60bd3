//! TriageEngine: the caller-facing API over every store.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::info;
use triage_cache::ResponseCache;
use triage_classifier::{HttpSemanticProvider, ResolutionPath, SemanticClassifier};
use triage_core::errors::InputError;
use triage_core::models::{
    ClassificationRequest, ClassificationResult, Correction, DegradationEvent, IndexItem,
    Metadata, ResultSource, SimilarityMatch,
};
use triage_core::traits::{IEmbeddingProvider, IRecordStore, ISemanticProvider};
use triage_core::{Category, TriageConfig, TriageResult};
use triage_learning::CorrectionStore;
use triage_observability::tracing_setup::events;
use triage_observability::{
    ClassificationMetrics, ClassificationOutcome, HealthReport, HealthReporter, HealthSnapshot,
    MetricsSnapshot,
};
use triage_patterns::{PatternClassifier, FEATURE_SET_VERSION};
use triage_similarity::SimilarityIndex;

use crate::orchestrator::{HybridOrchestrator, Orchestration};

/// Owns the response cache, correction log, and similarity index, and
/// exposes classification, indexing, search, and feedback to callers.
///
/// Every method takes `&self`; share one engine behind an `Arc`.
pub struct TriageEngine {
    orchestrator: HybridOrchestrator,
    similarity: SimilarityIndex,
    metrics: ClassificationMetrics,
    config: TriageConfig,
}

impl TriageEngine {
    /// Build an engine from explicit providers.
    ///
    /// With a record store, the correction log and the cache snapshot are
    /// loaded from it and written through to it.
    pub fn new(
        config: TriageConfig,
        semantic_provider: Arc<dyn ISemanticProvider>,
        embedding_provider: Arc<dyn IEmbeddingProvider>,
        store: Option<Arc<dyn IRecordStore>>,
    ) -> TriageResult<Self> {
        config.validate()?;

        let (cache, corrections) = match store {
            Some(store) => (
                ResponseCache::with_backing(
                    config.cache.clone(),
                    FEATURE_SET_VERSION,
                    Arc::clone(&store),
                )?,
                CorrectionStore::with_backing(config.learning.relevance_threshold, store)?,
            ),
            None => (
                ResponseCache::new(config.cache.clone(), FEATURE_SET_VERSION),
                CorrectionStore::new(config.learning.relevance_threshold),
            ),
        };

        let semantic = SemanticClassifier::new(
            semantic_provider,
            Arc::new(cache),
            config.classifier.clone(),
        );
        let orchestrator = HybridOrchestrator::new(
            PatternClassifier::new(config.default_category()),
            Arc::new(corrections),
            Arc::new(semantic),
            config.learning.top_n,
        );
        let similarity = SimilarityIndex::new(embedding_provider, config.similarity.clone());

        info!(
            refresh_policy = %config.classifier.refresh_policy,
            semantic_provider = orchestrator.semantic().provider_name(),
            embedding_provider = similarity.provider_name(),
            corrections = orchestrator.corrections().len(),
            "triage engine ready"
        );
        Ok(Self {
            orchestrator,
            similarity,
            metrics: ClassificationMetrics::new(),
            config,
        })
    }

    /// Build an engine with the providers and record store named in `config`.
    pub fn from_config(config: TriageConfig) -> TriageResult<Self> {
        config.validate()?;
        let semantic = HttpSemanticProvider::from_config(&config.classifier)?;
        let embeddings = triage_embeddings::create_provider(&config.embedding)?;
        let store = triage_storage::open_store(&config.storage)?;
        Self::new(config, Arc::new(semantic), embeddings, Some(store))
    }

    // ── Classification ──────────────────────────────────────────────────

    /// Classify one issue. Fails only on empty input.
    pub async fn classify(
        &self,
        title: &str,
        description: &str,
        impact: &str,
    ) -> TriageResult<ClassificationResult> {
        let request = ClassificationRequest::new(title, description, impact);
        Ok(self.classify_request(&request).await?.result)
    }

    /// Classify with a caller-supplied deadline for the provider call.
    pub async fn classify_with_deadline(
        &self,
        title: &str,
        description: &str,
        impact: &str,
        deadline: Duration,
    ) -> TriageResult<ClassificationResult> {
        let request = ClassificationRequest::new(title, description, impact);
        Ok(self.classify_detailed(&request, deadline).await?.result)
    }

    pub async fn classify_request(
        &self,
        request: &ClassificationRequest,
    ) -> TriageResult<Orchestration> {
        self.classify_detailed(request, self.config.classifier.provider_timeout())
            .await
    }

    /// Classify and keep the pattern features, corrections, and resolution path.
    pub async fn classify_detailed(
        &self,
        request: &ClassificationRequest,
        deadline: Duration,
    ) -> TriageResult<Orchestration> {
        let started = Instant::now();
        let outcome = match self.orchestrator.orchestrate_detailed(request, deadline).await {
            Ok(outcome) => outcome,
            Err(e) => {
                events::input_rejected("classify", &e.to_string());
                return Err(e.into());
            }
        };

        let result = &outcome.result;
        self.metrics
            .record_classification(metric_outcome(outcome.path), result.agreement, started.elapsed());
        if outcome.path.is_degraded() {
            events::degradation_triggered(
                "semantic_classifier",
                "provider call failed",
                source_label(result.source),
            );
        }
        events::classification_completed(
            result.category.as_str(),
            source_label(result.source),
            result.confidence,
            result.agreement,
        );
        Ok(outcome)
    }

    // ── Similarity ──────────────────────────────────────────────────────

    /// Index one item, replacing any previous entry with the same id.
    pub async fn index_item(
        &self,
        collection: &str,
        id: &str,
        text: &str,
        metadata: Metadata,
    ) -> TriageResult<()> {
        self.index_items(collection, vec![IndexItem::new(id, text, metadata)])
            .await
            .map(|_| ())
    }

    /// Index a batch with one embedding call. Returns the distinct ids written.
    pub async fn index_items(&self, collection: &str, items: Vec<IndexItem>) -> TriageResult<usize> {
        let written = self.similarity.index(collection, items).await?;
        events::collection_indexed(collection, written);
        Ok(written)
    }

    /// Related items; `top_k` and `min_score` default to the `[similarity]` section.
    pub async fn search_similar(
        &self,
        collection: &str,
        text: &str,
        top_k: Option<usize>,
        min_score: Option<f64>,
    ) -> TriageResult<Vec<SimilarityMatch>> {
        self.search_similar_with_deadline(
            collection,
            text,
            top_k,
            min_score,
            self.config.similarity.embedding_timeout(),
        )
        .await
    }

    pub async fn search_similar_with_deadline(
        &self,
        collection: &str,
        text: &str,
        top_k: Option<usize>,
        min_score: Option<f64>,
        deadline: Duration,
    ) -> TriageResult<Vec<SimilarityMatch>> {
        self.similarity
            .search_with_deadline(
                collection,
                text,
                top_k.unwrap_or(self.config.similarity.search_top_k),
                min_score.unwrap_or(self.config.similarity.search_min_score),
                deadline,
            )
            .await
    }

    /// Probable duplicates of `text` across `collections`; `min_score`
    /// defaults to the duplicate threshold.
    pub async fn check_duplicate<S: AsRef<str> + Sync>(
        &self,
        text: &str,
        collections: &[S],
        min_score: Option<f64>,
    ) -> TriageResult<Vec<SimilarityMatch>> {
        self.check_duplicate_with_deadline(
            text,
            collections,
            min_score,
            self.config.similarity.embedding_timeout(),
        )
        .await
    }

    pub async fn check_duplicate_with_deadline<S: AsRef<str> + Sync>(
        &self,
        text: &str,
        collections: &[S],
        min_score: Option<f64>,
        deadline: Duration,
    ) -> TriageResult<Vec<SimilarityMatch>> {
        let matches = self
            .similarity
            .duplicate_check_with_deadline(
                text,
                collections,
                min_score.unwrap_or(self.config.similarity.duplicate_min_score),
                deadline,
            )
            .await?;
        self.metrics.record_duplicate_check(matches.len());
        if let Some(top) = matches.first() {
            events::duplicates_flagged(collections.len(), matches.len(), top.score);
        }
        Ok(matches)
    }

    /// Empty a collection. Returns how many items were removed.
    pub fn clear_collection(&self, collection: &str) -> usize {
        let removed = self.similarity.clear(collection);
        events::collection_cleared(collection, removed);
        removed
    }

    pub fn remove_item(&self, collection: &str, id: &str) -> bool {
        self.similarity.remove(collection, id)
    }

    // ── Feedback ────────────────────────────────────────────────────────

    /// Append a correction to the log used as few-shot context.
    pub fn record_correction(&self, correction: Correction) -> TriageResult<()> {
        if correction.original_text.trim().is_empty() {
            return Err(InputError::EmptyText {
                field: "original_text".to_string(),
            }
            .into());
        }
        let (original, corrected) = (correction.original_category, correction.corrected_category);
        self.orchestrator.corrections().add(correction)?;
        events::correction_recorded(original.as_str(), corrected.as_str());
        Ok(())
    }

    /// Convenience wrapper building the `Correction` from its parts.
    pub fn record_misclassification(
        &self,
        original_text: &str,
        original_category: Category,
        corrected_category: Category,
        note: &str,
    ) -> TriageResult<()> {
        self.record_correction(Correction::new(
            original_text,
            original_category,
            corrected_category,
            note,
        ))
    }

    // ── Maintenance & observability ─────────────────────────────────────

    /// Drop cache entries past stale retention.
    pub fn purge_expired_cache(&self) -> usize {
        self.orchestrator.semantic().cache().purge_expired()
    }

    pub fn drain_degradation_events(&self) -> Vec<DegradationEvent> {
        self.orchestrator.semantic().drain_degradation_events()
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    pub fn health(&self) -> HealthReport {
        let semantic = self.orchestrator.semantic();
        let collections = self
            .similarity
            .collections()
            .into_iter()
            .map(|name| {
                let len = self.similarity.collection_len(&name);
                (name, len)
            })
            .collect();
        HealthReporter::build(&HealthSnapshot {
            semantic_provider: semantic.provider_name().to_string(),
            embedding_provider: self.similarity.provider_name().to_string(),
            cache_entries: semantic.cache().len(),
            cache_capacity: self.config.cache.max_entries,
            corrections: self.orchestrator.corrections().len(),
            collections,
            pending_degradations: semantic.degradation_count(),
            degradations_total: semantic.degradations_total(),
            metrics: self.metrics.snapshot(),
        })
    }

    pub fn orchestrator(&self) -> &HybridOrchestrator {
        &self.orchestrator
    }

    pub fn similarity(&self) -> &SimilarityIndex {
        &self.similarity
    }

    pub fn config(&self) -> &TriageConfig {
        &self.config
    }
}

fn metric_outcome(path: ResolutionPath) -> ClassificationOutcome {
    match path {
        ResolutionPath::CacheHit => ClassificationOutcome::CacheHit,
        ResolutionPath::Provider => ClassificationOutcome::Semantic,
        ResolutionPath::CacheFallback { stale: true } => ClassificationOutcome::StaleFallback,
        ResolutionPath::CacheFallback { stale: false } => ClassificationOutcome::CacheFallback,
        ResolutionPath::PatternFallback => ClassificationOutcome::PatternFallback,
    }
}

fn source_label(source: ResultSource) -> &'static str {
    match source {
        ResultSource::Cache => "cache",
        ResultSource::Pattern => "pattern",
        ResultSource::Semantic => "semantic",
    }
}
