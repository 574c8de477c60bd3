//! # triage-cache
//!
//! Content-addressed cache of classification results.
//!
//! Keys are blake3 hashes of (feature-set version, canonical text). Entries
//! age Fresh → Stale → Expired by elapsed time alone. Only Fresh entries are
//! served directly; any older entry is kept as the provider-failure fallback
//! until a newer answer overwrites it or `purge_expired` removes it. Reads
//! never evict. The moka layer only bounds capacity; freshness is computed
//! from each entry's own `created_at` and `ttl_secs`.

pub mod entry;
pub mod key;
pub mod response_cache;

pub use entry::{CacheEntry, Freshness};
pub use key::CacheKey;
pub use response_cache::{CacheLookup, ResponseCache};
