//! SemanticClassifier: provider-backed classification through the response cache.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{debug, info, warn};
use triage_cache::{CacheKey, CacheLookup, Freshness, ResponseCache};
use triage_core::config::{ClassifierConfig, RefreshPolicy};
use triage_core::errors::ProviderError;
use triage_core::models::{
    ClassificationResult, Correction, DegradationEvent, PatternFeatures, ResultSource,
};
use triage_core::constants::MAX_PENDING_DEGRADATIONS;
use triage_core::traits::ISemanticProvider;

use crate::prompt;
use crate::response::{parse_answer, SemanticAnswer};

const COMPONENT: &str = "semantic_classifier";

/// Which path produced a semantic classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionPath {
    /// Fresh cache entry served under cache-first.
    CacheHit,
    /// Provider answered and the cache was overwritten.
    Provider,
    /// Provider failed; a cached entry for the key was served instead.
    CacheFallback { stale: bool },
    /// Provider failed with nothing cached; the pattern result was served.
    PatternFallback,
}

impl ResolutionPath {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::CacheFallback { .. } | Self::PatternFallback)
    }
}

/// A classification and how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub result: ClassificationResult,
    pub path: ResolutionPath,
}

/// Classifier backed by an external semantic provider.
///
/// `classify` never fails: provider errors, timeouts, and invalid answers all
/// resolve through the fallback chain and are recorded as degradation events.
/// At most `event_capacity` undrained events are kept; the oldest go first.
pub struct SemanticClassifier {
    provider: Arc<dyn ISemanticProvider>,
    cache: Arc<ResponseCache>,
    config: ClassifierConfig,
    schema: serde_json::Value,
    events: Mutex<VecDeque<DegradationEvent>>,
    event_capacity: usize,
    degradations_total: AtomicU64,
}

impl SemanticClassifier {
    pub fn new(
        provider: Arc<dyn ISemanticProvider>,
        cache: Arc<ResponseCache>,
        config: ClassifierConfig,
    ) -> Self {
        Self {
            provider,
            cache,
            config,
            schema: prompt::output_schema(),
            events: Mutex::new(VecDeque::new()),
            event_capacity: MAX_PENDING_DEGRADATIONS,
            degradations_total: AtomicU64::new(0),
        }
    }

    /// Override how many undrained degradation events are retained.
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity.max(1);
        self
    }

    /// Classify with the configured provider timeout as the deadline.
    pub async fn classify(
        &self,
        canonical_text: &str,
        features: &PatternFeatures,
        corrections: &[Correction],
    ) -> ClassificationResult {
        self.resolve(canonical_text, features, corrections, self.config.provider_timeout())
            .await
            .result
    }

    pub async fn classify_with_deadline(
        &self,
        canonical_text: &str,
        features: &PatternFeatures,
        corrections: &[Correction],
        deadline: Duration,
    ) -> ClassificationResult {
        self.resolve(canonical_text, features, corrections, deadline)
            .await
            .result
    }

    /// Classify and report which path produced the result.
    pub async fn resolve(
        &self,
        canonical_text: &str,
        features: &PatternFeatures,
        corrections: &[Correction],
        deadline: Duration,
    ) -> Resolution {
        let key = self.cache.key_for(canonical_text);

        if self.config.refresh_policy == RefreshPolicy::CacheFirst {
            if let Some(hit) = self.cache.lookup(&key) {
                if hit.freshness == Freshness::Fresh {
                    debug!(key = %key, "semantic cache hit");
                    return Resolution {
                        result: from_cache(&hit, features, false),
                        path: ResolutionPath::CacheHit,
                    };
                }
                debug!(key = %key, freshness = ?hit.freshness, "cache entry past TTL, refreshing");
            } else {
                debug!(key = %key, "semantic cache miss");
            }
        }

        match self.call_provider(canonical_text, features, corrections, deadline).await {
            Ok(answer) => {
                let result = from_answer(answer, features);
                self.cache.put(key, result.clone());
                Resolution {
                    result,
                    path: ResolutionPath::Provider,
                }
            }
            Err(e) => self.fall_back(&key, features, &e),
        }
    }

    async fn call_provider(
        &self,
        canonical_text: &str,
        features: &PatternFeatures,
        corrections: &[Correction],
        deadline: Duration,
    ) -> Result<SemanticAnswer, ProviderError> {
        let prompt = prompt::build_prompt(
            canonical_text,
            features,
            corrections,
            self.config.max_corrections,
        );
        let started = Instant::now();
        let value = tokio::time::timeout(deadline, self.provider.complete(&prompt, &self.schema))
            .await
            .map_err(|_| ProviderError::Timeout {
                provider: self.provider.name().to_string(),
                elapsed_ms: started.elapsed().as_millis() as u64,
            })??;
        let answer = parse_answer(self.provider.name(), &value)?;
        info!(
            provider = self.provider.name(),
            category = %answer.category,
            confidence = answer.confidence,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "semantic provider answered"
        );
        Ok(answer)
    }

    /// Stale cache entry if one survives, otherwise the capped pattern result.
    fn fall_back(&self, key: &CacheKey, features: &PatternFeatures, error: &ProviderError) -> Resolution {
        let resolution = match self.cache.lookup(key) {
            Some(hit) => {
                let stale = hit.freshness != Freshness::Fresh;
                Resolution {
                    result: from_cache(&hit, features, stale),
                    path: ResolutionPath::CacheFallback { stale },
                }
            }
            None => Resolution {
                result: self.pattern_result(features, error),
                path: ResolutionPath::PatternFallback,
            },
        };

        let fallback_used = match resolution.path {
            ResolutionPath::CacheFallback { stale: true } => "stale_cache",
            ResolutionPath::CacheFallback { stale: false } => "cache",
            _ => "pattern",
        };
        warn!(
            provider = self.provider.name(),
            error = %error,
            fallback = fallback_used,
            "semantic provider failed, falling back"
        );
        self.record(DegradationEvent {
            component: COMPONENT.to_string(),
            failure: error.to_string(),
            fallback_used: fallback_used.to_string(),
            timestamp: Utc::now(),
        });
        resolution
    }

    fn pattern_result(&self, features: &PatternFeatures, error: &ProviderError) -> ClassificationResult {
        ClassificationResult {
            category: features.category,
            intent: features.category.default_intent(),
            confidence: features.confidence.min(self.config.fallback_confidence_cap),
            reasoning: format!(
                "Semantic classification unavailable ({error}); pattern classifier chose {}",
                features.category
            ),
            source: ResultSource::Pattern,
            // Nothing semantic to compare against.
            agreement: false,
            stale: false,
            business_impact: features.impact,
        }
    }

    fn record(&self, event: DegradationEvent) {
        self.degradations_total.fetch_add(1, Ordering::Relaxed);
        let mut events = self.events.lock().unwrap_or_else(PoisonError::into_inner);
        if events.len() >= self.event_capacity {
            events.pop_front();
        }
        events.push_back(event);
    }

    /// Take every retained degradation event, oldest first.
    pub fn drain_degradation_events(&self) -> Vec<DegradationEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect()
    }

    /// Degradation events retained and not yet drained.
    pub fn degradation_count(&self) -> usize {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Every degradation since construction, including dropped and drained ones.
    pub fn degradations_total(&self) -> u64 {
        self.degradations_total.load(Ordering::Relaxed)
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn cache(&self) -> &Arc<ResponseCache> {
        &self.cache
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }
}

fn from_answer(answer: SemanticAnswer, features: &PatternFeatures) -> ClassificationResult {
    ClassificationResult {
        category: answer.category,
        intent: answer.intent,
        confidence: answer.confidence,
        reasoning: answer.reasoning,
        source: ResultSource::Semantic,
        agreement: answer.category == features.category,
        stale: false,
        business_impact: answer.business_impact.unwrap_or(features.impact),
    }
}

/// Cached value relabelled for this call; agreement follows the current pattern result.
fn from_cache(hit: &CacheLookup, features: &PatternFeatures, stale: bool) -> ClassificationResult {
    let mut result = hit.entry.value.as_cached(stale);
    result.agreement = result.category == features.category;
    result
}
