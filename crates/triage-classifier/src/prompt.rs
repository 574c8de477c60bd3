//! Prompt assembly and the provider output schema.

use std::fmt::Write;

use serde_json::{json, Value};
use triage_core::models::{Correction, EntityKind, PatternFeatures};
use triage_core::{BusinessImpact, Category, Intent};

/// System instruction sent ahead of every prompt.
pub const SYSTEM_INSTRUCTION: &str = "You triage customer support issues. \
Answer only with JSON matching the provided schema. Use only the listed \
category and intent values.";

/// JSON schema of a provider answer, generated from the closed enumerations.
pub fn output_schema() -> Value {
    let categories: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
    let intents: Vec<&str> = Intent::ALL.iter().map(Intent::as_str).collect();
    let impacts: Vec<&str> = BusinessImpact::ALL.iter().map(BusinessImpact::as_str).collect();
    json!({
        "type": "object",
        "properties": {
            "category": { "type": "string", "enum": categories },
            "intent": { "type": "string", "enum": intents },
            "confidence": { "type": "number", "minimum": 0.0, "maximum": 1.0 },
            "reasoning": { "type": "string", "minLength": 1 },
            "business_impact": { "type": "string", "enum": impacts }
        },
        "required": ["category", "intent", "confidence", "reasoning"],
        "additionalProperties": false
    })
}

/// Build the classification prompt.
///
/// At most `max_corrections` corrections are included, in the order given.
pub fn build_prompt(
    canonical_text: &str,
    features: &PatternFeatures,
    corrections: &[Correction],
    max_corrections: usize,
) -> String {
    let mut out = String::with_capacity(512 + canonical_text.len());
    out.push_str("Classify the following support issue.\n\n");
    let _ = writeln!(out, "Issue:\n{canonical_text}\n");

    out.push_str("Pattern analysis:\n");
    let _ = writeln!(
        out,
        "- suggested category: {} (confidence {:.2})",
        features.category, features.confidence
    );
    let scored: Vec<String> = features
        .scores
        .iter()
        .filter(|s| s.score > 0.0)
        .map(|s| format!("{}={:.2}", s.category, s.score))
        .collect();
    let _ = writeln!(out, "- category scores: {}", list_or_none(&scored));
    let entities: Vec<String> = features
        .entities
        .iter()
        .map(|e| format!("{} ({})", e.value, entity_kind(e.kind)))
        .collect();
    let _ = writeln!(out, "- entities: {}", list_or_none(&entities));
    let _ = writeln!(out, "- technical indicators: {}", list_or_none(&features.indicators));
    let _ = writeln!(out, "- business impact: {}", features.impact);

    let shown: Vec<String> = corrections
        .iter()
        .take(max_corrections)
        .map(Correction::describe)
        .collect();
    if !shown.is_empty() {
        out.push_str("\nPast corrections for similar issues:\n");
        for (i, line) in shown.iter().enumerate() {
            let _ = writeln!(out, "{}. {line}", i + 1);
        }
    }

    out.push_str("\nAllowed categories: ");
    out.push_str(&join(Category::ALL.iter().map(Category::as_str)));
    out.push_str("\nAllowed intents: ");
    out.push_str(&join(Intent::ALL.iter().map(Intent::as_str)));
    out.push_str(
        "\n\nReturn category, intent, confidence between 0 and 1, a short reasoning, \
         and business_impact.\n",
    );
    out
}

fn entity_kind(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Product => "product",
        EntityKind::Service => "service",
        EntityKind::Region => "region",
        EntityKind::Compliance => "compliance",
    }
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

fn join<'a>(values: impl Iterator<Item = &'a str>) -> String {
    values.collect::<Vec<_>>().join(", ")
}
