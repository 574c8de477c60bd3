mod embedding;
mod record_store;
mod semantic;

pub use embedding::IEmbeddingProvider;
pub use record_store::{IRecordStore, StoredRecord};
pub use semantic::ISemanticProvider;
