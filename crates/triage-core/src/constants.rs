/// Triage engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum length of a collection name.
pub const MAX_COLLECTION_NAME_LEN: usize = 128;

/// Maximum number of items accepted by a single index call.
pub const MAX_INDEX_BATCH_SIZE: usize = 1000;

/// Record-store namespace holding the correction log.
pub const CORRECTIONS_NAMESPACE: &str = "corrections";

/// Record-store namespace holding the durable response-cache snapshot.
pub const RESPONSE_CACHE_NAMESPACE: &str = "response_cache";

/// Undrained degradation events a semantic classifier retains before
/// dropping the oldest.
pub const MAX_PENDING_DEGRADATIONS: usize = 1000;
