//! # triage-storage
//!
//! `IRecordStore` implementations: a SQLite-backed store for production and an
//! in-memory store for tests and ephemeral deployments.

pub mod memory;
pub mod pragmas;
pub mod schema;
pub mod sqlite;

use std::path::Path;
use std::sync::Arc;

use triage_core::config::StorageConfig;
use triage_core::errors::StorageError;
use triage_core::traits::IRecordStore;

pub use memory::MemoryRecordStore;
pub use sqlite::SqliteRecordStore;

/// Convert any error message into a `StorageError::Sqlite`.
pub(crate) fn to_storage_err(message: String) -> StorageError {
    StorageError::Sqlite { message }
}

/// Open the record store selected by `config`.
pub fn open_store(config: &StorageConfig) -> Result<Arc<dyn IRecordStore>, StorageError> {
    if config.in_memory {
        return Ok(Arc::new(MemoryRecordStore::new()));
    }
    Ok(Arc::new(SqliteRecordStore::open(Path::new(&config.db_path))?))
}
