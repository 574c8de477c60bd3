use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// When the semantic classifier consults the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshPolicy {
    /// Serve fresh cache entries; call the provider only on miss or expiry.
    #[default]
    CacheFirst,
    /// Always call the provider and overwrite the cache.
    ProviderFirst,
}

impl fmt::Display for RefreshPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CacheFirst => f.write_str("cache_first"),
            Self::ProviderFirst => f.write_str("provider_first"),
        }
    }
}

impl FromStr for RefreshPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "cache_first" => Ok(Self::CacheFirst),
            "provider_first" => Ok(Self::ProviderFirst),
            other => Err(format!("unknown refresh policy {other:?}")),
        }
    }
}

/// Semantic classifier configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub refresh_policy: RefreshPolicy,
    pub provider_timeout_ms: u64,
    /// Corrections included in a provider prompt.
    pub max_corrections: usize,
    /// Confidence ceiling for pattern-only fallback results.
    pub fallback_confidence_cap: f64,
    /// Category reported when no lexicon matches.
    pub default_category: String,
    pub provider_model: String,
    pub provider_endpoint: String,
    /// Environment variable holding the provider API key.
    pub api_key_env: String,
}

impl ClassifierConfig {
    pub fn provider_timeout(&self) -> Duration {
        Duration::from_millis(self.provider_timeout_ms)
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            refresh_policy: RefreshPolicy::default(),
            provider_timeout_ms: defaults::DEFAULT_PROVIDER_TIMEOUT_MS,
            max_corrections: defaults::DEFAULT_MAX_CORRECTIONS,
            fallback_confidence_cap: defaults::DEFAULT_FALLBACK_CONFIDENCE_CAP,
            default_category: defaults::DEFAULT_CATEGORY.to_string(),
            provider_model: defaults::DEFAULT_SEMANTIC_MODEL.to_string(),
            provider_endpoint: defaults::DEFAULT_SEMANTIC_ENDPOINT.to_string(),
            api_key_env: defaults::DEFAULT_API_KEY_ENV.to_string(),
        }
    }
}

/// Response cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub ttl_secs: u64,
    /// How long past its TTL an entry is kept as a stale fallback.
    pub stale_retention_secs: u64,
    pub max_entries: u64,
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn stale_retention(&self) -> Duration {
        Duration::from_secs(self.stale_retention_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: defaults::DEFAULT_CACHE_TTL_SECS,
            stale_retention_secs: defaults::DEFAULT_STALE_RETENTION_SECS,
            max_entries: defaults::DEFAULT_CACHE_MAX_ENTRIES,
        }
    }
}

/// Correction store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    /// Minimum token-set Jaccard similarity for a correction to be relevant.
    pub relevance_threshold: f64,
    pub top_n: usize,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            relevance_threshold: defaults::DEFAULT_RELEVANCE_THRESHOLD,
            top_n: defaults::DEFAULT_CORRECTION_TOP_N,
        }
    }
}

/// Similarity index configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityConfig {
    pub search_top_k: usize,
    pub search_min_score: f64,
    pub duplicate_min_score: f64,
    pub embedding_timeout_ms: u64,
    pub query_cache_size: u64,
}

impl SimilarityConfig {
    pub fn embedding_timeout(&self) -> Duration {
        Duration::from_millis(self.embedding_timeout_ms)
    }
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            search_top_k: defaults::DEFAULT_SEARCH_TOP_K,
            search_min_score: defaults::DEFAULT_SEARCH_MIN_SCORE,
            duplicate_min_score: defaults::DEFAULT_DUPLICATE_MIN_SCORE,
            embedding_timeout_ms: defaults::DEFAULT_EMBEDDING_TIMEOUT_MS,
            query_cache_size: defaults::DEFAULT_QUERY_CACHE_SIZE,
        }
    }
}

/// Embedding provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Embedding provider: "hashed" or "api".
    pub provider: String,
    pub model: String,
    pub endpoint: String,
    pub api_key_env: String,
    pub dimensions: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_EMBEDDING_PROVIDER.to_string(),
            model: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            endpoint: defaults::DEFAULT_EMBEDDING_ENDPOINT.to_string(),
            api_key_env: defaults::DEFAULT_API_KEY_ENV.to_string(),
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
        }
    }
}

/// Persistent record store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: String,
    pub in_memory: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: defaults::DEFAULT_DB_FILENAME.to_string(),
            in_memory: false,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::DEFAULT_LOG_LEVEL.to_string(),
            json_logs: defaults::DEFAULT_JSON_LOGS,
        }
    }
}
