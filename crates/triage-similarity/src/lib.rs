//! # triage-similarity
//!
//! Named collections of (id, vector, metadata) with exact cosine top-K search.
//!
//! Search is a linear O(n·d) scan over a copy-on-write snapshot of the
//! collection, so it never blocks on, or observes half of, a concurrent
//! index/clear. Results are a pure function of the stored vectors and the
//! query vector.

pub mod collection;
pub mod cosine;
pub mod index;

pub use collection::{Collection, StoredItem};
pub use cosine::cosine_similarity;
pub use index::SimilarityIndex;
