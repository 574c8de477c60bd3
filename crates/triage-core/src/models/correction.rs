use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::taxonomy::Category;

/// A recorded misclassification and its accepted fix.
///
/// Immutable once created: the correction log only appends, reads, and scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correction {
    pub original_text: String,
    pub original_category: Category,
    pub corrected_category: Category,
    pub note: String,
    pub created_at: DateTime<Utc>,
}

impl Correction {
    pub fn new(
        original_text: impl Into<String>,
        original_category: Category,
        corrected_category: Category,
        note: impl Into<String>,
    ) -> Self {
        Self {
            original_text: original_text.into(),
            original_category,
            corrected_category,
            note: note.into(),
            created_at: Utc::now(),
        }
    }

    /// Few-shot line for the semantic provider prompt.
    pub fn describe(&self) -> String {
        let note = self.note.trim();
        let reason = if note.is_empty() { "no reason given" } else { note };
        format!(
            "\"{}\" was classified as {} but should have been {} — because {}",
            self.original_text.trim(),
            self.original_category,
            self.corrected_category,
            reason
        )
    }
}
