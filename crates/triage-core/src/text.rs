//! Canonical text and tokenization shared by every classifier and store.

use std::collections::BTreeSet;

/// Normalize text: case-fold and collapse all whitespace runs to one space.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Join fields and normalize them into one canonical string.
///
/// Empty fields are skipped so that `("a", "", "b")` and `("a", "b", "")`
/// canonicalize identically.
pub fn canonicalize(fields: &[&str]) -> String {
    let joined = fields
        .iter()
        .map(|f| f.trim())
        .filter(|f| !f.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    normalize(&joined)
}

/// Split text into lowercase alphanumeric tokens.
///
/// Hyphens and dots between alphanumerics are kept (`gpt-4`, `v2.1`),
/// everything else separates tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut tokens = Vec::new();
    let mut current = String::new();
    let chars: Vec<char> = lower.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        let joiner = (c == '-' || c == '.')
            && !current.is_empty()
            && chars.get(i + 1).is_some_and(|n| n.is_alphanumeric());
        if c.is_alphanumeric() || joiner {
            current.push(c);
        } else if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Distinct tokens of `text`.
pub fn token_set(text: &str) -> BTreeSet<String> {
    tokenize(text).into_iter().collect()
}

/// Hex blake3 digest of a string.
pub fn content_hash(text: &str) -> String {
    blake3::hash(text.as_bytes()).to_hex().to_string()
}
