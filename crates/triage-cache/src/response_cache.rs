//! ResponseCache: moka-backed store of classification results.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use moka::sync::Cache;
use tracing::{debug, info, warn};
use triage_core::config::CacheConfig;
use triage_core::constants::RESPONSE_CACHE_NAMESPACE;
use triage_core::errors::{CacheError, StorageError};
use triage_core::models::ClassificationResult;
use triage_core::traits::{IRecordStore, StoredRecord};

use crate::entry::{CacheEntry, Freshness};
use crate::key::CacheKey;

/// A cache hit together with its freshness at lookup time.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheLookup {
    pub entry: CacheEntry,
    pub freshness: Freshness,
}

/// Content-addressed classification cache.
///
/// Writes are last-writer-wins: concurrent `put`s for one key both land and
/// whichever lands last stays. When a record store is attached, every write
/// is mirrored to it so the cache survives restarts; writes are serialized so
/// the in-memory and persisted winners are the same entry.
///
/// Lookups never remove anything. An entry stays until a newer answer
/// replaces it, `purge_expired` or `invalidate` removes it, or capacity
/// pressure evicts it.
pub struct ResponseCache {
    entries: Cache<CacheKey, CacheEntry>,
    config: CacheConfig,
    feature_set_version: u32,
    backing: Option<Arc<dyn IRecordStore>>,
    write_lock: Mutex<()>,
}

impl ResponseCache {
    pub fn new(config: CacheConfig, feature_set_version: u32) -> Self {
        let entries = Cache::builder().max_capacity(config.max_entries).build();
        Self {
            entries,
            config,
            feature_set_version,
            backing: None,
            write_lock: Mutex::new(()),
        }
    }

    /// Restore the durable snapshot from `backing`, then write through to it.
    ///
    /// Corrupted records are discarded from the store. Entries of any age are
    /// restored; old ones remain the provider-failure fallback.
    pub fn with_backing(
        config: CacheConfig,
        feature_set_version: u32,
        backing: Arc<dyn IRecordStore>,
    ) -> Result<Self, StorageError> {
        let mut cache = Self::new(config, feature_set_version);
        let records = backing.read_all(RESPONSE_CACHE_NAMESPACE)?;
        let (mut restored, mut discarded) = (0usize, 0usize);

        for record in &records {
            match decode_entry(record) {
                Ok(entry) => {
                    cache.entries.insert(entry.key.clone(), entry);
                    restored += 1;
                }
                Err(e) => {
                    warn!(error = %e, "discarding corrupted cache entry");
                    backing.remove(RESPONSE_CACHE_NAMESPACE, &record.key)?;
                    discarded += 1;
                }
            }
        }
        info!(restored, discarded, "response cache snapshot loaded");

        cache.backing = Some(backing);
        Ok(cache)
    }

    /// Key for a canonical text under this cache's feature-set version.
    pub fn key_for(&self, canonical_text: &str) -> CacheKey {
        CacheKey::derive(canonical_text, self.feature_set_version)
    }

    pub fn lookup(&self, key: &CacheKey) -> Option<CacheLookup> {
        self.lookup_at(key, Utc::now())
    }

    /// Look up `key` as of `now`, whatever the entry's age.
    pub fn lookup_at(&self, key: &CacheKey, now: DateTime<Utc>) -> Option<CacheLookup> {
        let entry = self.entries.get(key)?;
        let freshness = entry.freshness(now, self.config.stale_retention_secs);
        if freshness == Freshness::Expired {
            debug!(key = %key, "cache entry past stale retention");
        }
        Some(CacheLookup { entry, freshness })
    }

    /// Store `value` under `key` with the configured TTL, replacing any prior entry.
    pub fn put(&self, key: CacheKey, value: ClassificationResult) -> CacheEntry {
        let entry = CacheEntry::new(key, value, self.config.ttl_secs);
        self.insert_entry(entry.clone());
        entry
    }

    /// Store a fully-formed entry (its own `created_at` and TTL are kept).
    ///
    /// Memory is updated first, then the snapshot; a failed snapshot write is
    /// logged and the in-memory entry stays.
    pub fn insert_entry(&self, entry: CacheEntry) {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.entries.insert(entry.key.clone(), entry.clone());
        if let Some(backing) = &self.backing {
            match serde_json::to_string(&entry) {
                Ok(payload) => {
                    if let Err(e) =
                        backing.write(RESPONSE_CACHE_NAMESPACE, entry.key.as_str(), &payload)
                    {
                        warn!(key = %entry.key, error = %e, "cache snapshot write failed");
                    }
                }
                Err(e) => warn!(key = %entry.key, error = %e, "cache entry not serializable"),
            }
        }
    }

    pub fn invalidate(&self, key: &CacheKey) {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.entries.invalidate(key);
        if let Some(backing) = &self.backing {
            if let Err(e) = backing.remove(RESPONSE_CACHE_NAMESPACE, key.as_str()) {
                warn!(key = %key, error = %e, "cache snapshot remove failed");
            }
        }
    }

    /// Maintenance: drop every entry past stale retention. Returns how many
    /// were removed. Nothing else in the read path removes old entries.
    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Utc::now())
    }

    pub fn purge_expired_at(&self, now: DateTime<Utc>) -> usize {
        let expired: Vec<CacheKey> = self
            .entries
            .iter()
            .filter(|(_, entry)| {
                entry.freshness(now, self.config.stale_retention_secs) == Freshness::Expired
            })
            .map(|(key, _)| CacheKey::clone(&key))
            .collect();

        for key in &expired {
            self.invalidate(key);
        }
        if !expired.is_empty() {
            info!(purged = expired.len(), "expired cache entries purged");
        }
        expired.len()
    }

    /// Number of live entries.
    pub fn len(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invalidate all entries, including the durable snapshot.
    pub fn clear(&self) {
        let keys: Vec<CacheKey> = self
            .entries
            .iter()
            .map(|(key, _)| CacheKey::clone(&key))
            .collect();
        for key in &keys {
            self.invalidate(key);
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn feature_set_version(&self) -> u32 {
        self.feature_set_version
    }
}

/// Decode one persisted record, rejecting anything malformed.
pub fn decode_entry(record: &StoredRecord) -> Result<CacheEntry, CacheError> {
    let corrupted = |reason: String| CacheError::Corrupted {
        key: record.key.clone(),
        reason,
    };

    let entry: CacheEntry =
        serde_json::from_str(&record.payload).map_err(|e| corrupted(e.to_string()))?;
    if entry.key != CacheKey::from_stored(record.key.clone()) {
        return Err(corrupted(format!("stored under foreign key {}", entry.key)));
    }
    if !(0.0..=1.0).contains(&entry.value.confidence) {
        return Err(corrupted(format!(
            "confidence {} outside [0, 1]",
            entry.value.confidence
        )));
    }
    Ok(entry)
}
