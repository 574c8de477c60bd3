//! SQLite-backed `IRecordStore`.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rusqlite::{params, Connection, ErrorCode};
use tracing::debug;
use triage_core::errors::StorageError;
use triage_core::traits::{IRecordStore, StoredRecord};

use crate::{pragmas, schema, to_storage_err};

/// Single serialized connection. Record-store traffic is a handful of small
/// writes per classification, so one writer is enough.
pub struct SqliteRecordStore {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl SqliteRecordStore {
    /// Open (or create) a database file and run migrations.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        pragmas::apply_pragmas(&conn)?;
        schema::migrate(&conn)?;
        debug!(path = %path.display(), "record store opened");
        Ok(Self {
            conn: Mutex::new(conn),
            path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        schema::migrate(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: None,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn with_conn<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|e| to_storage_err(format!("connection lock poisoned: {e}")))?;
        f(&guard)
    }
}

impl IRecordStore for SqliteRecordStore {
    fn read_all(&self, namespace: &str) -> Result<Vec<StoredRecord>, StorageError> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare_cached("SELECT key, payload FROM records WHERE namespace = ?1 ORDER BY seq")
                .map_err(|e| to_storage_err(e.to_string()))?;
            let rows = stmt
                .query_map(params![namespace], |row| {
                    Ok(StoredRecord {
                        key: row.get(0)?,
                        payload: row.get(1)?,
                    })
                })
                .map_err(|e| to_storage_err(e.to_string()))?;
            rows.collect::<Result<Vec<_>, _>>()
                .map_err(|e| to_storage_err(e.to_string()))
        })
    }

    fn append(&self, namespace: &str, key: &str, payload: &str) -> Result<(), StorageError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO records (namespace, key, payload) VALUES (?1, ?2, ?3)",
                params![namespace, key, payload],
            )
            .map_err(|e| match e.sqlite_error_code() {
                Some(ErrorCode::ConstraintViolation) => {
                    to_storage_err(format!("record {namespace}/{key} already exists"))
                }
                _ => to_storage_err(e.to_string()),
            })?;
            Ok(())
        })
    }

    fn write(&self, namespace: &str, key: &str, payload: &str) -> Result<(), StorageError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO records (namespace, key, payload) VALUES (?1, ?2, ?3)
                 ON CONFLICT(namespace, key) DO UPDATE SET
                    payload = excluded.payload,
                    updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
                params![namespace, key, payload],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
            Ok(())
        })
    }

    fn remove(&self, namespace: &str, key: &str) -> Result<(), StorageError> {
        self.with_conn(|conn| {
            conn.execute(
                "DELETE FROM records WHERE namespace = ?1 AND key = ?2",
                params![namespace, key],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
            Ok(())
        })
    }
}
