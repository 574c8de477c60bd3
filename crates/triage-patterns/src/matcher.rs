//! Token-sequence phrase matching over canonical text.

use triage_core::models::Entity;
use triage_core::text;

use crate::lexicon::{EntityEntry, ENTITIES};

/// Tokenized text with phrase lookup.
///
/// Phrases match on whole tokens only, so `available` never matches inside
/// `unavailable`.
#[derive(Debug, Clone)]
pub struct TokenText {
    tokens: Vec<String>,
}

impl TokenText {
    pub fn new(input: &str) -> Self {
        Self {
            tokens: text::tokenize(input),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Token index of the first occurrence of `phrase`, if any.
    pub fn find(&self, phrase: &str) -> Option<usize> {
        let needle: Vec<&str> = phrase.split(' ').collect();
        if needle.is_empty() || needle.len() > self.tokens.len() {
            return None;
        }
        (0..=self.tokens.len() - needle.len()).find(|&start| self.matches_at(start, &needle))
    }

    pub fn contains(&self, phrase: &str) -> bool {
        self.find(phrase).is_some()
    }

    /// Number of distinct terms from `terms` present in the text.
    pub fn count_terms(&self, terms: &[&str]) -> usize {
        terms.iter().filter(|t| self.contains(t)).count()
    }

    /// Terms present in the text, ordered by first appearance.
    /// Equal positions keep lexicon order.
    pub fn ordered_hits(&self, terms: &[&str]) -> Vec<String> {
        let mut hits: Vec<(usize, usize, &str)> = terms
            .iter()
            .enumerate()
            .filter_map(|(rank, t)| self.find(t).map(|pos| (pos, rank, *t)))
            .collect();
        hits.sort_by_key(|&(pos, rank, _)| (pos, rank));
        hits.into_iter().map(|(_, _, t)| t.to_string()).collect()
    }

    /// Detect entities left to right, longest alias first at each position.
    ///
    /// Matched tokens are consumed, so `east us 2` yields only `East US 2`.
    /// Each entity is reported once, at its first appearance.
    pub fn entities(&self) -> Vec<Entity> {
        let aliases = alias_table();
        let mut found: Vec<Entity> = Vec::new();
        let mut pos = 0;

        while pos < self.tokens.len() {
            let hit = aliases
                .iter()
                .find(|(needle, _)| self.matches_at(pos, needle));
            match hit {
                Some((needle, entry)) => {
                    let entity = Entity {
                        kind: entry.kind,
                        value: entry.name.to_string(),
                    };
                    if !found.contains(&entity) {
                        found.push(entity);
                    }
                    pos += needle.len();
                }
                None => pos += 1,
            }
        }
        found
    }

    fn matches_at(&self, start: usize, needle: &[&str]) -> bool {
        start + needle.len() <= self.tokens.len()
            && self.tokens[start..start + needle.len()]
                .iter()
                .zip(needle)
                .all(|(token, word)| token == word)
    }
}

/// Every alias as a token sequence, longest first. The sort is stable, so
/// aliases of equal length keep lexicon order.
fn alias_table() -> Vec<(Vec<&'static str>, &'static EntityEntry)> {
    let mut table: Vec<(Vec<&'static str>, &'static EntityEntry)> = ENTITIES
        .iter()
        .flat_map(|entry| {
            entry
                .aliases
                .iter()
                .map(move |alias| (alias.split(' ').collect::<Vec<_>>(), entry))
        })
        .collect();
    table.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    table
}
