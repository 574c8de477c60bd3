use serde::{Deserialize, Serialize};

use crate::errors::InputError;
use crate::text;

/// One issue submission to classify. Transient: lives for a single call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRequest {
    pub title: String,
    pub description: String,
    pub impact: String,
}

impl ClassificationRequest {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        impact: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            impact: impact.into(),
        }
    }

    /// Case-folded, whitespace-collapsed concatenation of all fields.
    /// The identity of the request for caching and similarity.
    pub fn canonical_text(&self) -> String {
        text::canonicalize(&[&self.title, &self.description, &self.impact])
    }

    /// Reject requests that carry no text at all.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.title.trim().is_empty() && self.description.trim().is_empty() {
            return Err(InputError::EmptyText {
                field: "title/description".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_text_joins_and_normalizes() {
        let req = ClassificationRequest::new("Need Azure OpenAI", "We want to use  GPT-4", "");
        assert_eq!(req.canonical_text(), "need azure openai we want to use gpt-4");
    }

    #[test]
    fn whitespace_variants_share_identity() {
        let a = ClassificationRequest::new("SQL MI", "west europe", "");
        let b = ClassificationRequest::new("  sql   mi ", "WEST\nEUROPE", " ");
        assert_eq!(a.canonical_text(), b.canonical_text());
    }

    #[test]
    fn empty_request_rejected() {
        let req = ClassificationRequest::new(" ", "\n", "blocker");
        assert!(matches!(req.validate(), Err(InputError::EmptyText { .. })));
    }

    #[test]
    fn title_only_is_accepted() {
        assert!(ClassificationRequest::new("quota", "", "").validate().is_ok());
    }
}
