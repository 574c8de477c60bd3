/// Persistent record store errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    Sqlite { message: String },

    #[error("record serialization failed: {reason}")]
    Serialization { reason: String },
}
