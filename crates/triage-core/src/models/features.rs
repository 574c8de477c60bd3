use serde::{Deserialize, Serialize};

use crate::taxonomy::{BusinessImpact, Category};

/// Kinds of named entities the pattern classifier recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Product,
    Service,
    Region,
    Compliance,
}

/// A detected entity, normalized to its lexicon spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    pub value: String,
}

/// Score of one category, in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: Category,
    pub score: f64,
}

/// Output of the deterministic pattern classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternFeatures {
    /// Winning category (declaration order breaks ties).
    pub category: Category,
    /// One score per category, in `Category::ALL` order.
    pub scores: Vec<CategoryScore>,
    /// Entities in order of first appearance, without repeats.
    pub entities: Vec<Entity>,
    /// Technical indicator keywords in order of first appearance.
    pub indicators: Vec<String>,
    pub confidence: f64,
    pub impact: BusinessImpact,
}

impl PatternFeatures {
    /// Score of one category (0.0 if absent).
    pub fn score(&self, category: Category) -> f64 {
        self.scores
            .iter()
            .find(|s| s.category == category)
            .map(|s| s.score)
            .unwrap_or(0.0)
    }

    /// Whether any category lexicon matched.
    pub fn has_category_match(&self) -> bool {
        self.scores.iter().any(|s| s.score > 0.0)
    }

    /// Entities of one kind.
    pub fn entities_of(&self, kind: EntityKind) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(move |e| e.kind == kind)
    }
}
