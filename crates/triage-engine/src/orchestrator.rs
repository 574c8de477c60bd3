//! HybridOrchestrator: pattern → corrections → semantic, per call.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;
use triage_classifier::{ResolutionPath, SemanticClassifier};
use triage_core::errors::InputError;
use triage_core::models::{ClassificationRequest, ClassificationResult, Correction, PatternFeatures};
use triage_learning::CorrectionStore;
use triage_patterns::PatternClassifier;

/// Everything one orchestrated classification produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Orchestration {
    pub result: ClassificationResult,
    pub features: PatternFeatures,
    /// Corrections retrieved for the request, most similar first.
    pub corrections: Vec<Correction>,
    pub path: ResolutionPath,
}

/// Stateless composition of the three classifiers over shared stores.
pub struct HybridOrchestrator {
    patterns: PatternClassifier,
    corrections: Arc<CorrectionStore>,
    semantic: Arc<SemanticClassifier>,
    top_n: usize,
}

impl HybridOrchestrator {
    pub fn new(
        patterns: PatternClassifier,
        corrections: Arc<CorrectionStore>,
        semantic: Arc<SemanticClassifier>,
        top_n: usize,
    ) -> Self {
        Self {
            patterns,
            corrections,
            semantic,
            top_n,
        }
    }

    /// Classify `request` with the semantic classifier's configured deadline.
    pub async fn orchestrate(
        &self,
        request: &ClassificationRequest,
    ) -> Result<ClassificationResult, InputError> {
        let deadline = self.semantic.config().provider_timeout();
        Ok(self.orchestrate_detailed(request, deadline).await?.result)
    }

    /// Classify `request`, keeping the intermediate pattern features,
    /// retrieved corrections, and resolution path.
    ///
    /// Only empty input fails; provider trouble resolves through the fallback chain.
    pub async fn orchestrate_detailed(
        &self,
        request: &ClassificationRequest,
        deadline: Duration,
    ) -> Result<Orchestration, InputError> {
        request.validate()?;
        let canonical = request.canonical_text();

        let features = self.patterns.classify(&canonical);
        let corrections = self.corrections.find_relevant(&canonical, self.top_n);
        debug!(
            pattern_category = %features.category,
            pattern_confidence = features.confidence,
            corrections = corrections.len(),
            "pattern stage complete"
        );

        let resolution = self
            .semantic
            .resolve(&canonical, &features, &corrections, deadline)
            .await;

        Ok(Orchestration {
            result: resolution.result,
            features,
            corrections,
            path: resolution.path,
        })
    }

    pub fn patterns(&self) -> &PatternClassifier {
        &self.patterns
    }

    pub fn corrections(&self) -> &Arc<CorrectionStore> {
        &self.corrections
    }

    pub fn semantic(&self) -> &Arc<SemanticClassifier> {
        &self.semantic
    }
}
