//! # triage-classifier
//!
//! Semantic classification through an external provider.
//!
//! - `SemanticClassifier`: cache lookup per refresh policy, provider call
//!   under a deadline, strict response validation, fallback chain
//!   (stale cache → pattern result) on provider failure
//! - `prompt`: prompt assembly and the output schema derived from the taxonomy
//! - `response`: parsing of loosely-typed provider JSON into a `SemanticAnswer`
//! - `HttpSemanticProvider`: OpenAI-compatible chat-completions provider

pub mod http_provider;
pub mod prompt;
pub mod response;
pub mod semantic;

pub use http_provider::HttpSemanticProvider;
pub use response::SemanticAnswer;
pub use semantic::{Resolution, ResolutionPath, SemanticClassifier};
