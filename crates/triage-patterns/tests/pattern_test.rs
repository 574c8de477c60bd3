//! Golden scenarios for the pattern classifier.

use triage_core::{BusinessImpact, Category, ClassificationRequest};
use triage_patterns::{PatternClassifier, DEFAULT_CONFIDENCE};

#[test]
fn golden_pattern_scenarios() {
    let classifier = PatternClassifier::default();
    for scenario in test_fixtures::pattern_scenarios() {
        let request =
            ClassificationRequest::new(&scenario.title, &scenario.description, &scenario.impact);
        let features = classifier.classify(&request.canonical_text());
        let expected: Category = scenario.expected_category.parse().unwrap();

        assert_eq!(features.category, expected, "{}", scenario.name);
        if let Some(min) = scenario.min_confidence {
            assert!(
                features.confidence >= min,
                "{}: confidence {} < {}",
                scenario.name,
                features.confidence,
                min
            );
        }
        if let Some(max) = scenario.max_confidence {
            assert!(
                features.confidence <= max,
                "{}: confidence {} > {}",
                scenario.name,
                features.confidence,
                max
            );
        }
        if let Some(entities) = &scenario.expected_entities {
            let found: Vec<&str> = features.entities.iter().map(|e| e.value.as_str()).collect();
            assert_eq!(&found, entities, "{}", scenario.name);
        }
        if let Some(impact) = &scenario.expected_impact {
            let impact: BusinessImpact = impact.parse().unwrap();
            assert_eq!(features.impact, impact, "{}", scenario.name);
        }
    }
}

#[test]
fn scenario_a_falls_back_to_general() {
    let request = ClassificationRequest::new("Need Azure OpenAI", "We want to use GPT-4", "");
    let features = PatternClassifier::default().classify(&request.canonical_text());
    assert_eq!(features.category, Category::General);
    assert!(features.confidence < 0.5);
    assert_eq!(features.confidence, DEFAULT_CONFIDENCE);
}

#[test]
fn repeated_calls_are_identical() {
    let classifier = PatternClassifier::default();
    let text = "gdpr audit for sql mi in sweden central, blocker";
    let first = classifier.classify(text);
    for _ in 0..10 {
        assert_eq!(classifier.classify(text), first);
    }
}

#[test]
fn features_serialize_with_snake_case_labels() {
    let features = PatternClassifier::default().classify("quota in west europe");
    let json = serde_json::to_value(&features).unwrap();
    assert_eq!(json["category"], "capacity_quota");
    assert_eq!(json["entities"][0]["kind"], "region");
}
