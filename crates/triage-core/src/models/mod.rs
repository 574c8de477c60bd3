mod correction;
mod degradation_event;
mod features;
mod request;
mod result;
mod similarity;

pub use correction::Correction;
pub use degradation_event::DegradationEvent;
pub use features::{CategoryScore, Entity, EntityKind, PatternFeatures};
pub use request::ClassificationRequest;
pub use result::{ClassificationResult, ResultSource};
pub use similarity::{EmbeddingVector, IndexItem, Metadata, SimilarityMatch};
