pub mod api;
pub mod hashed;

pub use api::ApiEmbeddingProvider;
pub use hashed::HashedEmbedder;
