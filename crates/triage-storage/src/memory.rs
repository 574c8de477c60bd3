//! In-memory `IRecordStore`.

use std::collections::HashMap;
use std::sync::Mutex;

use triage_core::errors::StorageError;
use triage_core::traits::{IRecordStore, StoredRecord};

use crate::to_storage_err;

/// Records per namespace, in insertion order. Nothing survives the process.
#[derive(Default)]
pub struct MemoryRecordStore {
    namespaces: Mutex<HashMap<String, Vec<StoredRecord>>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_namespaces<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&mut HashMap<String, Vec<StoredRecord>>) -> Result<T, StorageError>,
    {
        let mut guard = self
            .namespaces
            .lock()
            .map_err(|e| to_storage_err(format!("record lock poisoned: {e}")))?;
        f(&mut guard)
    }
}

impl IRecordStore for MemoryRecordStore {
    fn read_all(&self, namespace: &str) -> Result<Vec<StoredRecord>, StorageError> {
        self.with_namespaces(|ns| Ok(ns.get(namespace).cloned().unwrap_or_default()))
    }

    fn append(&self, namespace: &str, key: &str, payload: &str) -> Result<(), StorageError> {
        self.with_namespaces(|ns| {
            let records = ns.entry(namespace.to_string()).or_default();
            if records.iter().any(|r| r.key == key) {
                return Err(to_storage_err(format!(
                    "record {namespace}/{key} already exists"
                )));
            }
            records.push(StoredRecord {
                key: key.to_string(),
                payload: payload.to_string(),
            });
            Ok(())
        })
    }

    fn write(&self, namespace: &str, key: &str, payload: &str) -> Result<(), StorageError> {
        self.with_namespaces(|ns| {
            let records = ns.entry(namespace.to_string()).or_default();
            match records.iter_mut().find(|r| r.key == key) {
                Some(existing) => existing.payload = payload.to_string(),
                None => records.push(StoredRecord {
                    key: key.to_string(),
                    payload: payload.to_string(),
                }),
            }
            Ok(())
        })
    }

    fn remove(&self, namespace: &str, key: &str) -> Result<(), StorageError> {
        self.with_namespaces(|ns| {
            if let Some(records) = ns.get_mut(namespace) {
                records.retain(|r| r.key != key);
            }
            Ok(())
        })
    }
}
