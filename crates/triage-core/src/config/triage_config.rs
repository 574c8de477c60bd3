//! Top-level triage configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    CacheConfig, ClassifierConfig, EmbeddingConfig, LearningConfig, ObservabilityConfig,
    RefreshPolicy, SimilarityConfig, StorageConfig,
};
use crate::errors::ConfigError;
use crate::taxonomy::Category;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`TRIAGE_*`)
/// 2. Config file (`triage.toml`)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TriageConfig {
    pub classifier: ClassifierConfig,
    pub cache: CacheConfig,
    pub learning: LearningConfig,
    pub similarity: SimilarityConfig,
    pub embedding: EmbeddingConfig,
    pub storage: StorageConfig,
    pub observability: ObservabilityConfig,
}

impl TriageConfig {
    /// Load from an optional TOML file, apply `TRIAGE_*` overrides, validate.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let content =
                    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
                        path: path.display().to_string(),
                    })?;
                toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?
            }
            None => Self::default(),
        };

        config.apply_env_overrides_from(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Apply overrides from a variable lookup (the process environment in production).
    pub fn apply_env_overrides_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("TRIAGE_REFRESH_POLICY") {
            self.classifier.refresh_policy =
                v.parse::<RefreshPolicy>()
                    .map_err(|message| ConfigError::ValidationFailed {
                        field: "TRIAGE_REFRESH_POLICY".to_string(),
                        message,
                    })?;
        }
        if let Some(v) = lookup("TRIAGE_PROVIDER_TIMEOUT_MS") {
            self.classifier.provider_timeout_ms = parse_env("TRIAGE_PROVIDER_TIMEOUT_MS", &v)?;
        }
        if let Some(v) = lookup("TRIAGE_CACHE_TTL_SECS") {
            self.cache.ttl_secs = parse_env("TRIAGE_CACHE_TTL_SECS", &v)?;
        }
        if let Some(v) = lookup("TRIAGE_EMBEDDING_PROVIDER") {
            self.embedding.provider = v;
        }
        if let Some(v) = lookup("TRIAGE_DB_PATH") {
            self.storage.db_path = v;
        }
        if let Some(v) = lookup("TRIAGE_LOG_LEVEL") {
            self.observability.log_level = v;
        }
        Ok(())
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.classifier;
        require_positive("classifier.provider_timeout_ms", c.provider_timeout_ms)?;
        require_unit("classifier.fallback_confidence_cap", c.fallback_confidence_cap)?;
        if c.default_category.parse::<Category>().is_err() {
            return Err(invalid(
                "classifier.default_category",
                format!("{:?} is not a known category", c.default_category),
            ));
        }

        require_positive("cache.ttl_secs", self.cache.ttl_secs)?;
        require_positive("cache.max_entries", self.cache.max_entries)?;

        require_unit("learning.relevance_threshold", self.learning.relevance_threshold)?;
        require_positive("learning.top_n", self.learning.top_n as u64)?;

        let s = &self.similarity;
        require_positive("similarity.search_top_k", s.search_top_k as u64)?;
        require_cosine("similarity.search_min_score", s.search_min_score)?;
        require_cosine("similarity.duplicate_min_score", s.duplicate_min_score)?;
        require_positive("similarity.embedding_timeout_ms", s.embedding_timeout_ms)?;
        require_positive("similarity.query_cache_size", s.query_cache_size)?;

        require_positive("embedding.dimensions", self.embedding.dimensions as u64)?;
        if !matches!(self.embedding.provider.as_str(), "hashed" | "api") {
            return Err(invalid(
                "embedding.provider",
                format!("unknown provider {:?}", self.embedding.provider),
            ));
        }

        if !self.storage.in_memory && self.storage.db_path.trim().is_empty() {
            return Err(invalid("storage.db_path", "must not be empty".to_string()));
        }
        Ok(())
    }

    /// The configured default category, already validated.
    pub fn default_category(&self) -> Category {
        self.classifier
            .default_category
            .parse()
            .unwrap_or(Category::General)
    }
}

fn invalid(field: &str, message: String) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message,
    }
}

fn require_positive(field: &str, value: u64) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(invalid(field, "must be greater than 0".to_string()));
    }
    Ok(())
}

fn require_unit(field: &str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(invalid(field, "must be between 0.0 and 1.0".to_string()));
    }
    Ok(())
}

fn require_cosine(field: &str, value: f64) -> Result<(), ConfigError> {
    if !(-1.0..=1.0).contains(&value) {
        return Err(invalid(field, "must be between -1.0 and 1.0".to_string()));
    }
    Ok(())
}

fn parse_env(field: &str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| invalid(field, format!("{value:?} is not an unsigned integer")))
}
