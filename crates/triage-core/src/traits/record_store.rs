use serde::{Deserialize, Serialize};

use crate::errors::StorageError;

/// One persisted record: an opaque payload under a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub key: String,
    pub payload: String,
}

/// Durable key-value / append-log store backing corrections and the cache snapshot.
///
/// Records are grouped by namespace. `read_all` returns records in insertion order.
pub trait IRecordStore: Send + Sync {
    fn read_all(&self, namespace: &str) -> Result<Vec<StoredRecord>, StorageError>;

    /// Append a new record. Appending an existing key is an error for append logs.
    fn append(&self, namespace: &str, key: &str, payload: &str) -> Result<(), StorageError>;

    /// Insert or replace a record.
    fn write(&self, namespace: &str, key: &str, payload: &str) -> Result<(), StorageError>;

    fn remove(&self, namespace: &str, key: &str) -> Result<(), StorageError>;
}
