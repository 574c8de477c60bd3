/// Failures of the external embedding or semantic-classification backends.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProviderError {
    #[error("{provider} timed out after {elapsed_ms}ms")]
    Timeout { provider: String, elapsed_ms: u64 },

    #[error("{provider} unavailable: {reason}")]
    Unavailable { provider: String, reason: String },

    #[error("{provider} quota exhausted")]
    QuotaExhausted { provider: String },

    #[error("{provider} returned an invalid response: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

impl ProviderError {
    /// Name of the provider that failed, when known.
    pub fn provider(&self) -> Option<&str> {
        match self {
            Self::Timeout { provider, .. }
            | Self::Unavailable { provider, .. }
            | Self::QuotaExhausted { provider }
            | Self::InvalidResponse { provider, .. } => Some(provider),
            Self::DimensionMismatch { .. } => None,
        }
    }

    /// Transient failures worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Unavailable { .. })
    }
}
