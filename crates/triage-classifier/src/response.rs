//! Strict parsing of provider answers.

use serde_json::{Map, Value};
use triage_core::errors::ProviderError;
use triage_core::{BusinessImpact, Category, Intent};

/// A provider answer that passed validation against the closed taxonomy.
#[derive(Debug, Clone, PartialEq)]
pub struct SemanticAnswer {
    pub category: Category,
    pub intent: Intent,
    pub confidence: f64,
    pub reasoning: String,
    /// Absent when the provider did not assess impact.
    pub business_impact: Option<BusinessImpact>,
}

/// Validate every field of `value`. Any missing, mistyped, or out-of-range
/// field rejects the whole answer.
pub fn parse_answer(provider: &str, value: &Value) -> Result<SemanticAnswer, ProviderError> {
    let invalid = |reason: String| ProviderError::InvalidResponse {
        provider: provider.to_string(),
        reason,
    };

    let object = value
        .as_object()
        .ok_or_else(|| invalid(format!("expected a JSON object, got {}", kind(value))))?;

    let category = required_str(object, "category")
        .map_err(&invalid)?
        .parse::<Category>()
        .map_err(|e| invalid(e.to_string()))?;
    let intent = required_str(object, "intent")
        .map_err(&invalid)?
        .parse::<Intent>()
        .map_err(|e| invalid(e.to_string()))?;

    let confidence = match object.get("confidence") {
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| invalid("confidence is not representable".to_string()))?,
        Some(other) => return Err(invalid(format!("confidence is {}", kind(other)))),
        None => return Err(invalid("missing field confidence".to_string())),
    };
    if !(0.0..=1.0).contains(&confidence) {
        return Err(invalid(format!("confidence {confidence} outside [0, 1]")));
    }

    let reasoning = required_str(object, "reasoning").map_err(&invalid)?.trim();
    if reasoning.is_empty() {
        return Err(invalid("reasoning is empty".to_string()));
    }

    let business_impact = match object.get("business_impact") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(
            s.parse::<BusinessImpact>()
                .map_err(|e| invalid(e.to_string()))?,
        ),
        Some(other) => return Err(invalid(format!("business_impact is {}", kind(other)))),
    };

    Ok(SemanticAnswer {
        category,
        intent,
        confidence,
        reasoning: reasoning.to_string(),
        business_impact,
    })
}

fn required_str<'a>(object: &'a Map<String, Value>, field: &str) -> Result<&'a str, String> {
    match object.get(field) {
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(format!("{field} is {}", kind(other))),
        None => Err(format!("missing field {field}")),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
