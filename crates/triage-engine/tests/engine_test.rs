//! TriageEngine end-to-end tests: the three acceptance scenarios, the
//! fallback chain, persistence across restarts, concurrency, health.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use test_fixtures::providers::semantic_response;
use test_fixtures::{FailingProvider, KeyedEmbedder, ScriptedProvider, SlowProvider};
use triage_classifier::ResolutionPath;
use triage_core::config::RefreshPolicy;
use triage_core::errors::InputError;
use triage_core::models::{IndexItem, Metadata};
use triage_core::traits::{IEmbeddingProvider, IRecordStore, ISemanticProvider};
use triage_core::{Category, ClassificationRequest, ResultSource, TriageConfig, TriageError};
use triage_embeddings::HashedEmbedder;
use triage_engine::TriageEngine;
use triage_observability::HealthStatus;
use triage_storage::{MemoryRecordStore, SqliteRecordStore};

fn engine_with(
    semantic: Arc<dyn ISemanticProvider>,
    embeddings: Arc<dyn IEmbeddingProvider>,
    store: Option<Arc<dyn IRecordStore>>,
) -> TriageEngine {
    TriageEngine::new(TriageConfig::default(), semantic, embeddings, store).unwrap()
}

fn engine(semantic: Arc<dyn ISemanticProvider>) -> TriageEngine {
    engine_with(semantic, Arc::new(HashedEmbedder::new(384)), None)
}

fn availability_answer() -> serde_json::Value {
    semantic_response(
        "service_availability",
        "request_access",
        0.92,
        "asks whether SQL MI is offered in West Europe",
    )
}

// Scenario A: vague request, provider down, low-confidence pattern result.
#[tokio::test]
async fn scenario_a_vague_request_falls_back_to_pattern() {
    let engine = engine(Arc::new(FailingProvider::unavailable()));

    let result = engine
        .classify("Need Azure OpenAI", "We want to use GPT-4", "")
        .await
        .unwrap();

    assert_eq!(result.category, Category::General);
    assert!(result.confidence < 0.5, "confidence {}", result.confidence);
    assert_eq!(result.source, ResultSource::Pattern);
    assert_eq!(engine.drain_degradation_events().len(), 1);
}

// Scenario B: an indexed item is its own best match with score 1.0.
#[tokio::test]
async fn scenario_b_exact_duplicate_scores_one() {
    let engine = engine(Arc::new(FailingProvider::unavailable()));
    let corpus = test_fixtures::similarity_corpus();
    let items: Vec<IndexItem> = corpus.items.into_iter().map(IndexItem::from).collect();
    assert_eq!(engine.index_items(&corpus.collection, items).await.unwrap(), 3);

    let query = &corpus.queries[0];
    let matches = engine
        .search_similar(&corpus.collection, &query.text, None, None)
        .await
        .unwrap();
    assert_eq!(matches[0].id, query.top_id);
    assert!((matches[0].score - query.top_score).abs() < 1e-9);
    assert_eq!(matches[0].metadata.get("state"), Some(&json!("active")));

    let duplicates = engine
        .check_duplicate(&query.text, &[corpus.collection.as_str()], None)
        .await
        .unwrap();
    assert_eq!(duplicates[0].id, "wi-101");
    assert_eq!(engine.metrics().duplicate_checks, 1);
}

// Scenario C: a recorded correction reaches the provider prompt.
#[tokio::test]
async fn scenario_c_correction_feeds_the_prompt() {
    let provider = Arc::new(ScriptedProvider::always(semantic_response(
        "capacity_quota",
        "request_access",
        0.81,
        "regional capacity, per earlier correction",
    )));
    let engine = engine(provider.clone());
    engine
        .record_misclassification(
            "SQL MI availability West Europe",
            Category::ServiceAvailability,
            Category::CapacityQuota,
            "region is capacity-constrained",
        )
        .unwrap();

    let request = ClassificationRequest::new("SQL MI availability West Europe", "", "");
    let outcome = engine.classify_request(&request).await.unwrap();

    assert_eq!(outcome.corrections.len(), 1);
    assert_eq!(outcome.features.category, Category::ServiceAvailability);
    assert_eq!(outcome.result.category, Category::CapacityQuota);
    assert!(!outcome.result.agreement);
    let prompt = provider.last_prompt().unwrap();
    assert!(prompt.contains("region is capacity-constrained"), "{prompt}");
}

#[tokio::test]
async fn repeated_request_is_served_from_cache() {
    let provider = Arc::new(ScriptedProvider::always(availability_answer()));
    let engine = engine(provider.clone());

    let first = engine
        .classify("SQL MI availability West Europe", "", "")
        .await
        .unwrap();
    let second = engine
        .classify("  sql mi availability   west europe ", "", "")
        .await
        .unwrap();

    assert_eq!(provider.calls(), 1);
    assert_eq!(first.source, ResultSource::Semantic);
    assert_eq!(second.source, ResultSource::Cache);
    assert_eq!(second.category, first.category);
    assert_eq!(second.confidence, first.confidence);

    let metrics = engine.metrics();
    assert_eq!(metrics.total, 2);
    assert_eq!(metrics.cache_hits, 1);
    assert_eq!(metrics.semantic_calls, 1);
}

#[tokio::test]
async fn provider_first_calls_every_time() {
    let provider = Arc::new(ScriptedProvider::always(availability_answer()));
    let mut config = TriageConfig::default();
    config.classifier.refresh_policy = RefreshPolicy::ProviderFirst;
    let engine = TriageEngine::new(
        config,
        provider.clone(),
        Arc::new(HashedEmbedder::new(384)),
        None,
    )
    .unwrap();

    for _ in 0..3 {
        engine.classify("SQL MI availability", "", "").await.unwrap();
    }
    assert_eq!(provider.calls(), 3);
}

#[tokio::test]
async fn invalid_provider_output_falls_back() {
    let provider = Arc::new(ScriptedProvider::always(json!({
        "category": "astrology",
        "intent": "request_access",
        "confidence": 0.9,
        "reasoning": "made up",
    })));
    let engine = engine(provider);

    let request = ClassificationRequest::new(
        "Unexpected invoice charges",
        "Pricing for reservation does not match our budget",
        "",
    );
    let outcome = engine.classify_request(&request).await.unwrap();

    assert_eq!(outcome.path, ResolutionPath::PatternFallback);
    assert_eq!(outcome.result.category, Category::CostBilling);
    assert!(outcome.result.confidence <= 0.6);
    assert_eq!(engine.metrics().pattern_fallbacks, 1);
}

#[tokio::test]
async fn slow_provider_hits_the_deadline() {
    let provider = Arc::new(SlowProvider::new(Duration::from_secs(5), availability_answer()));
    let engine = engine(provider);

    let started = std::time::Instant::now();
    let result = engine
        .classify_with_deadline(
            "SQL MI availability West Europe",
            "",
            "",
            Duration::from_millis(50),
        )
        .await
        .unwrap();

    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(result.source, ResultSource::Pattern);
    let events = engine.drain_degradation_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].fallback_used, "pattern");
}

#[tokio::test]
async fn empty_request_is_an_input_error() {
    let provider = Arc::new(ScriptedProvider::always(availability_answer()));
    let engine = engine(provider.clone());

    let err = engine.classify("  ", "\n", "urgent").await.unwrap_err();
    assert!(err.is_input());
    assert!(matches!(err, TriageError::Input(InputError::EmptyText { .. })));
    assert_eq!(provider.calls(), 0);
    assert_eq!(engine.metrics().total, 0);

    let err = engine
        .record_misclassification(" ", Category::General, Category::CostBilling, "")
        .unwrap_err();
    assert!(err.is_input());
    assert_eq!(engine.orchestrator().corrections().len(), 0);
}

#[tokio::test]
async fn embedding_failure_surfaces_on_search() {
    let embedder = Arc::new(KeyedEmbedder::new(8));
    let engine = engine_with(
        Arc::new(FailingProvider::unavailable()),
        embedder.clone(),
        None,
    );
    engine
        .index_item("tickets", "t-1", "quota increase", Metadata::new())
        .await
        .unwrap();

    embedder.set_failing(true);
    let err = engine
        .search_similar("tickets", "quota", None, None)
        .await
        .unwrap_err();
    assert!(err.is_provider());
}

#[tokio::test]
async fn clear_and_remove_items() {
    let engine = engine(Arc::new(FailingProvider::unavailable()));
    for (id, text) in [("a", "sql mi quota"), ("b", "cosmos db gdpr")] {
        engine
            .index_item("tickets", id, text, Metadata::new())
            .await
            .unwrap();
    }

    assert!(engine.remove_item("tickets", "a"));
    assert!(!engine.remove_item("tickets", "a"));
    assert_eq!(engine.clear_collection("tickets"), 1);
    assert!(engine
        .search_similar("tickets", "cosmos db gdpr", None, Some(0.0))
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn cache_and_corrections_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("triage.db");
    let text = "GDPR and EU Data Boundary";

    {
        let store: Arc<dyn IRecordStore> = Arc::new(SqliteRecordStore::open(&path).unwrap());
        let provider = Arc::new(ScriptedProvider::always(semantic_response(
            "compliance_regulatory",
            "seek_guidance",
            0.88,
            "regulatory certification question",
        )));
        let engine = engine_with(provider, Arc::new(HashedEmbedder::new(64)), Some(store));
        engine.classify(text, "", "").await.unwrap();
        engine
            .record_misclassification(
                "Invoice shows GDPR surcharge",
                Category::ComplianceRegulatory,
                Category::CostBilling,
                "about the bill, not compliance",
            )
            .unwrap();
    }

    let store: Arc<dyn IRecordStore> = Arc::new(SqliteRecordStore::open(&path).unwrap());
    let provider = Arc::new(FailingProvider::unavailable());
    let engine = engine_with(provider.clone(), Arc::new(HashedEmbedder::new(64)), Some(store));

    assert_eq!(engine.orchestrator().corrections().len(), 1);
    let request = ClassificationRequest::new(text, "", "");
    let outcome = engine.classify_request(&request).await.unwrap();
    assert_eq!(outcome.path, ResolutionPath::CacheHit);
    assert_eq!(outcome.result.category, Category::ComplianceRegulatory);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_callers_share_one_engine() {
    let provider = Arc::new(ScriptedProvider::always(availability_answer()));
    let store: Arc<dyn IRecordStore> = Arc::new(MemoryRecordStore::new());
    let engine = Arc::new(engine_with(
        provider,
        Arc::new(HashedEmbedder::new(64)),
        Some(store),
    ));

    let mut handles = Vec::new();
    for i in 0..16 {
        let engine = Arc::clone(&engine);
        handles.push(tokio::spawn(async move {
            let (id, text) = (format!("t-{i}"), format!("ticket number {i}"));
            engine
                .index_item("tickets", &id, &text, Metadata::new())
                .await
                .unwrap();
            engine
                .classify("SQL MI availability West Europe", "", "")
                .await
                .unwrap()
        }));
    }

    for handle in handles {
        let result = handle.await.unwrap();
        assert_eq!(result.category, Category::ServiceAvailability);
    }
    assert_eq!(engine.metrics().total, 16);
    assert_eq!(engine.similarity().collection_len("tickets"), 16);
}

#[tokio::test]
async fn health_reflects_provider_outage() {
    let engine = engine(Arc::new(FailingProvider::unavailable()));
    assert_eq!(engine.health().overall_status, HealthStatus::Healthy);

    for i in 0..10 {
        engine
            .classify(&format!("quota increase request {i}"), "", "")
            .await
            .unwrap();
    }

    let report = engine.health();
    assert_eq!(report.overall_status, HealthStatus::Unhealthy);
    assert_eq!(report.pending_degradations, 10);
    assert_eq!(report.degradations_total, 10);
    assert_eq!(report.metrics.pattern_fallbacks, 10);
    assert_eq!(report.metrics.provider_failures, 10);
    assert_eq!(report.metrics.agreement_rate, 0.0);

    engine.drain_degradation_events();
    let report = engine.health();
    assert_eq!(report.pending_degradations, 0);
    assert_eq!(report.degradations_total, 10);
}

#[tokio::test]
async fn outage_does_not_inflate_agreement_rate() {
    let provider = Arc::new(ScriptedProvider::always(semantic_response(
        "capacity_quota",
        "request_access",
        0.8,
        "wants more quota",
    )));
    let healthy = engine(provider);
    healthy
        .classify("quota increase for 500k tpm gpt-4o capacity limit", "", "")
        .await
        .unwrap();
    assert_eq!(healthy.metrics().agreement_rate, 1.0);

    let down = engine(Arc::new(FailingProvider::unavailable()));
    for i in 0..5 {
        let result = down
            .classify(&format!("quota increase request {i}"), "", "")
            .await
            .unwrap();
        assert!(!result.agreement);
    }
    let metrics = down.metrics();
    assert_eq!(metrics.pattern_fallbacks, 5);
    assert_eq!(metrics.agreements, 0);
    assert_eq!(metrics.agreement_rate, 0.0);
}

#[test]
fn invalid_config_is_rejected() {
    let mut config = TriageConfig::default();
    config.similarity.duplicate_min_score = 1.5;
    let result = TriageEngine::new(
        config,
        Arc::new(FailingProvider::unavailable()),
        Arc::new(HashedEmbedder::new(8)),
        None,
    );
    assert!(matches!(result, Err(TriageError::Config(_))));
}

#[test]
fn from_config_requires_the_provider_key() {
    let mut config = TriageConfig::default();
    config.classifier.api_key_env = "TRIAGE_ENGINE_TEST_KEY_NEVER_SET".to_string();
    config.storage.in_memory = true;
    let result = TriageEngine::from_config(config);
    assert!(matches!(result, Err(TriageError::Config(_))));
}
