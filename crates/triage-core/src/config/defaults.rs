// Single source of truth for all default values.

// --- Classifier ---
pub const DEFAULT_PROVIDER_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_MAX_CORRECTIONS: usize = 3;
pub const DEFAULT_FALLBACK_CONFIDENCE_CAP: f64 = 0.6;
pub const DEFAULT_CATEGORY: &str = "general";
pub const DEFAULT_SEMANTIC_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_SEMANTIC_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_API_KEY_ENV: &str = "TRIAGE_API_KEY";

// --- Provider retry ---
pub const DEFAULT_PROVIDER_MAX_RETRIES: u32 = 2;
pub const DEFAULT_RETRY_INITIAL_BACKOFF_MS: u64 = 200;
pub const DEFAULT_RETRY_MAX_BACKOFF_MS: u64 = 5_000;

// --- Cache ---
pub const DEFAULT_CACHE_TTL_SECS: u64 = 604_800; // 7 days
pub const DEFAULT_STALE_RETENTION_SECS: u64 = 2_592_000; // 30 days
pub const DEFAULT_CACHE_MAX_ENTRIES: u64 = 10_000;

// --- Learning ---
pub const DEFAULT_RELEVANCE_THRESHOLD: f64 = 0.20;
pub const DEFAULT_CORRECTION_TOP_N: usize = 3;

// --- Similarity ---
pub const DEFAULT_SEARCH_TOP_K: usize = 10;
pub const DEFAULT_SEARCH_MIN_SCORE: f64 = 0.75;
pub const DEFAULT_DUPLICATE_MIN_SCORE: f64 = 0.70;
pub const DEFAULT_EMBEDDING_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_QUERY_CACHE_SIZE: u64 = 1_000;

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "hashed";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_EMBEDDING_ENDPOINT: &str = "https://api.openai.com/v1/embeddings";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 384;

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "triage.db";

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
