//! PatternClassifier: deterministic category scoring with no external calls.

use triage_core::models::{CategoryScore, Entity, PatternFeatures};
use triage_core::Category;

use crate::impact;
use crate::lexicon::{
    CategoryLexicon, GroupSource, CATEGORY_LEXICONS, GROUP_SATURATION, TECHNICAL_INDICATORS,
};
use crate::matcher::TokenText;
use crate::DEFAULT_CONFIDENCE;

/// Lexicon-driven pre-classifier.
///
/// `classify` is a pure function of its input: the same text always yields
/// the same `PatternFeatures`.
#[derive(Debug, Clone)]
pub struct PatternClassifier {
    default_category: Category,
}

impl Default for PatternClassifier {
    fn default() -> Self {
        Self::new(Category::General)
    }
}

impl PatternClassifier {
    pub fn new(default_category: Category) -> Self {
        Self { default_category }
    }

    pub fn default_category(&self) -> Category {
        self.default_category
    }

    /// Score `text` against every category lexicon. Never fails.
    pub fn classify(&self, text: &str) -> PatternFeatures {
        let tokens = TokenText::new(text);
        let entities = tokens.entities();

        let scores: Vec<CategoryScore> = CATEGORY_LEXICONS
            .iter()
            .map(|lexicon| CategoryScore {
                category: lexicon.category,
                score: score_category(lexicon, &tokens, &entities),
            })
            .collect();

        let (category, top) = self.pick_winner(&scores);
        let confidence = if top > 0.0 {
            DEFAULT_CONFIDENCE + (1.0 - DEFAULT_CONFIDENCE) * top
        } else {
            DEFAULT_CONFIDENCE
        };

        let features = PatternFeatures {
            category,
            scores,
            entities,
            indicators: tokens.ordered_hits(TECHNICAL_INDICATORS),
            confidence,
            impact: impact::assess(&tokens),
        };

        tracing::debug!(
            category = %features.category,
            confidence = features.confidence,
            entities = features.entities.len(),
            indicators = features.indicators.len(),
            "pattern classification"
        );
        features
    }

    /// Highest score wins; a strict `>` over declaration order keeps the
    /// first-declared category on ties. All-zero falls to the default.
    fn pick_winner(&self, scores: &[CategoryScore]) -> (Category, f64) {
        let mut best: Option<&CategoryScore> = None;
        for candidate in scores {
            if candidate.score <= 0.0 {
                continue;
            }
            match best {
                Some(current) if candidate.score > current.score => best = Some(candidate),
                None => best = Some(candidate),
                _ => {}
            }
        }
        match best {
            Some(winner) => (winner.category, winner.score),
            None => (self.default_category, 0.0),
        }
    }
}

/// Normalized weighted sum of group hits, clipped to [0, 1].
/// A group saturates at `GROUP_SATURATION` hits.
fn score_category(lexicon: &CategoryLexicon, tokens: &TokenText, entities: &[Entity]) -> f64 {
    let total = lexicon.total_weight();
    if total <= 0.0 {
        return 0.0;
    }
    let weighted: f64 = lexicon
        .groups
        .iter()
        .map(|group| {
            let hits = match group.source {
                GroupSource::Terms(terms) => tokens.count_terms(terms),
                GroupSource::Entities(kind) => entities.iter().filter(|e| e.kind == kind).count(),
            };
            group.weight * hits.min(GROUP_SATURATION) as f64 / GROUP_SATURATION as f64
        })
        .sum();
    (weighted / total).clamp(0.0, 1.0)
}
