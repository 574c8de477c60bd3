use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator between the version and the text. Canonical text never contains
/// control characters other than the single spaces left by normalization.
const KEY_SEPARATOR: char = '\u{1f}';

/// Hex blake3 digest identifying one (canonical text, feature-set version) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    /// Pure function of its inputs; never depends on wall-clock time.
    pub fn derive(canonical_text: &str, feature_set_version: u32) -> Self {
        let material = format!("{feature_set_version}{KEY_SEPARATOR}{canonical_text}");
        Self(blake3::hash(material.as_bytes()).to_hex().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn from_stored(key: String) -> Self {
        Self(key)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_inputs_same_key() {
        assert_eq!(CacheKey::derive("quota", 1), CacheKey::derive("quota", 1));
    }

    #[test]
    fn version_changes_key() {
        assert_ne!(CacheKey::derive("quota", 1), CacheKey::derive("quota", 2));
    }

    #[test]
    fn version_and_text_do_not_run_together() {
        assert_ne!(CacheKey::derive("1 quota", 1), CacheKey::derive(" quota", 11));
    }

    #[test]
    fn key_is_hex_digest() {
        let key = CacheKey::derive("x", 1);
        assert_eq!(key.as_str().len(), 64);
        assert!(key.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }
}
