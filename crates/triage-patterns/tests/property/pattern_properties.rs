use proptest::prelude::*;
use triage_core::Category;
use triage_patterns::{PatternClassifier, DEFAULT_CONFIDENCE};

const VOCAB: &[&str] = &[
    "quota", "availability", "west", "europe", "gdpr", "error", "roadmap", "pricing",
    "feature", "azure", "openai", "gpt-4", "sql", "mi", "east", "us", "2", "blocker",
    "api", "the", "need", "timeout", "limit", "Compliance", "ETA",
];

fn sentence() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(VOCAB), 0..24).prop_map(|words| words.join(" "))
}

proptest! {
    #[test]
    fn classification_is_deterministic(text in sentence()) {
        let classifier = PatternClassifier::default();
        prop_assert_eq!(classifier.classify(&text), classifier.classify(&text));
    }

    #[test]
    fn arbitrary_input_never_panics(text in ".{0,200}") {
        let features = PatternClassifier::default().classify(&text);
        prop_assert_eq!(features.scores.len(), Category::COUNT);
    }

    #[test]
    fn scores_and_confidence_in_range(text in sentence()) {
        let features = PatternClassifier::default().classify(&text);
        for s in &features.scores {
            prop_assert!((0.0..=1.0).contains(&s.score));
        }
        prop_assert!(features.confidence >= DEFAULT_CONFIDENCE);
        prop_assert!(features.confidence <= 1.0);
    }

    #[test]
    fn winner_has_maximal_score(text in sentence()) {
        let features = PatternClassifier::default().classify(&text);
        let max = features.scores.iter().map(|s| s.score).fold(0.0, f64::max);
        prop_assert_eq!(features.score(features.category), max);
    }

    #[test]
    fn whitespace_and_case_do_not_matter(text in sentence()) {
        let classifier = PatternClassifier::default();
        let shouted = text.to_uppercase().replace(' ', "  \t");
        prop_assert_eq!(classifier.classify(&text), classifier.classify(&shouted));
    }
}
