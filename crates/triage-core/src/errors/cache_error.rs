/// Response-cache errors. A corrupted entry is always treated as a miss.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CacheError {
    #[error("corrupted cache entry {key}: {reason}")]
    Corrupted { key: String, reason: String },
}
