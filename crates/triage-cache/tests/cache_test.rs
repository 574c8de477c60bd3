//! Durable snapshot behavior of the response cache.

use std::sync::Arc;

use chrono::{Duration, Utc};
use triage_cache::{CacheEntry, CacheKey, Freshness, ResponseCache};
use triage_core::config::CacheConfig;
use triage_core::constants::RESPONSE_CACHE_NAMESPACE;
use triage_core::models::{ClassificationResult, ResultSource};
use triage_core::traits::IRecordStore;
use triage_core::{BusinessImpact, Category, Intent};
use triage_storage::MemoryRecordStore;

fn result() -> ClassificationResult {
    ClassificationResult {
        category: Category::ServiceAvailability,
        intent: Intent::RequestAccess,
        confidence: 0.91,
        reasoning: "regional availability question".to_string(),
        source: ResultSource::Semantic,
        agreement: true,
        stale: false,
        business_impact: BusinessImpact::Low,
    }
}

#[test]
fn snapshot_survives_restart() {
    let backing = Arc::new(MemoryRecordStore::new());
    let key = {
        let cache = ResponseCache::with_backing(CacheConfig::default(), 1, backing.clone()).unwrap();
        let key = cache.key_for("sql mi availability west europe");
        cache.put(key.clone(), result());
        key
    };

    let restored = ResponseCache::with_backing(CacheConfig::default(), 1, backing).unwrap();
    let hit = restored.lookup(&key).unwrap();
    assert_eq!(hit.freshness, Freshness::Fresh);
    assert_eq!(hit.entry.value, result());
}

#[test]
fn corrupted_records_are_discarded_on_load() {
    let backing = Arc::new(MemoryRecordStore::new());
    backing.write(RESPONSE_CACHE_NAMESPACE, "broken", "not json").unwrap();
    let good = CacheEntry::new(CacheKey::derive("quota", 1), result(), 600);
    backing
        .write(
            RESPONSE_CACHE_NAMESPACE,
            good.key.as_str(),
            &serde_json::to_string(&good).unwrap(),
        )
        .unwrap();

    let cache = ResponseCache::with_backing(CacheConfig::default(), 1, backing.clone()).unwrap();
    assert_eq!(cache.len(), 1);
    let remaining = backing.read_all(RESPONSE_CACHE_NAMESPACE).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].key, good.key.as_str());
}

#[test]
fn old_records_are_restored_until_purged() {
    let backing = Arc::new(MemoryRecordStore::new());
    let mut old = CacheEntry::new(CacheKey::derive("old", 1), result(), 10);
    old.created_at = Utc::now() - Duration::days(365);
    backing
        .write(
            RESPONSE_CACHE_NAMESPACE,
            old.key.as_str(),
            &serde_json::to_string(&old).unwrap(),
        )
        .unwrap();

    let cache = ResponseCache::with_backing(CacheConfig::default(), 1, backing.clone()).unwrap();
    let hit = cache.lookup(&old.key).unwrap();
    assert_eq!(hit.freshness, Freshness::Expired);
    assert_eq!(hit.entry.value, result());
    // A second read still finds it.
    assert!(cache.lookup(&old.key).is_some());

    assert_eq!(cache.purge_expired(), 1);
    assert!(cache.lookup(&old.key).is_none());
    assert!(backing.read_all(RESPONSE_CACHE_NAMESPACE).unwrap().is_empty());
}

#[test]
fn clear_empties_cache_and_snapshot() {
    let backing = Arc::new(MemoryRecordStore::new());
    let cache = ResponseCache::with_backing(CacheConfig::default(), 1, backing.clone()).unwrap();
    cache.put(cache.key_for("a"), result());
    cache.put(cache.key_for("b"), result());
    cache.clear();
    assert!(cache.lookup(&cache.key_for("a")).is_none());
    assert!(backing.read_all(RESPONSE_CACHE_NAMESPACE).unwrap().is_empty());
}

#[test]
fn feature_set_version_partitions_keys() {
    let v1 = ResponseCache::new(CacheConfig::default(), 1);
    let v2 = ResponseCache::new(CacheConfig::default(), 2);
    assert_ne!(v1.key_for("quota"), v2.key_for("quota"));
}

#[test]
fn concurrent_puts_leave_one_entry() {
    let cache = Arc::new(ResponseCache::new(CacheConfig::default(), 1));
    let key = cache.key_for("contended");
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            let key = key.clone();
            std::thread::spawn(move || {
                for _ in 0..100 {
                    cache.put(key.clone(), result());
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(cache.len(), 1);
    assert!(cache.lookup(&key).is_some());
}

#[test]
fn concurrent_puts_persist_the_in_memory_winner() {
    let backing = Arc::new(MemoryRecordStore::new());
    let cache = Arc::new(
        ResponseCache::with_backing(CacheConfig::default(), 1, backing.clone()).unwrap(),
    );
    let key = cache.key_for("contended");
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let cache = Arc::clone(&cache);
            let key = key.clone();
            std::thread::spawn(move || {
                for i in 0..50 {
                    let mut value = result();
                    value.reasoning = format!("writer {t} round {i}");
                    cache.put(key.clone(), value);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let in_memory = cache.lookup(&key).unwrap().entry;
    let records = backing.read_all(RESPONSE_CACHE_NAMESPACE).unwrap();
    assert_eq!(records.len(), 1);
    let persisted: CacheEntry = serde_json::from_str(&records[0].payload).unwrap();
    assert_eq!(persisted, in_memory);
}
