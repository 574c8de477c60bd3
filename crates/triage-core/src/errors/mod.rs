//! Error handling for the triage engine.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod cache_error;
pub mod config_error;
pub mod input_error;
pub mod provider_error;
pub mod storage_error;

pub use cache_error::CacheError;
pub use config_error::ConfigError;
pub use input_error::InputError;
pub use provider_error::ProviderError;
pub use storage_error::StorageError;

/// Umbrella error returned across crate boundaries.
#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    #[error("input error: {0}")]
    Input(#[from] InputError),

    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl TriageError {
    /// Whether the error came from an external provider (embedding or semantic).
    pub fn is_provider(&self) -> bool {
        matches!(self, Self::Provider(_))
    }

    /// Whether the caller supplied bad input.
    pub fn is_input(&self) -> bool {
        matches!(self, Self::Input(_))
    }
}

pub type TriageResult<T> = Result<T, TriageError>;
