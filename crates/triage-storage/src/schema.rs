//! Record table: one row per (namespace, key), ordered by insertion.

use rusqlite::Connection;
use triage_core::errors::StorageError;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS records (
            seq         INTEGER PRIMARY KEY AUTOINCREMENT,
            namespace   TEXT NOT NULL,
            key         TEXT NOT NULL,
            payload     TEXT NOT NULL,
            updated_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            UNIQUE (namespace, key)
        );

        CREATE INDEX IF NOT EXISTS idx_records_namespace ON records(namespace, seq);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
