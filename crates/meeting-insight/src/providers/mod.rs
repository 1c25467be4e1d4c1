//! Provider abstractions for document storage, profile enrichment, and generation
//!
//! Handlers only see these traits; concrete clients are chosen once at startup.

pub mod document_store;
pub mod gcp;
pub mod llm;
pub mod profile;
pub mod rapidapi;

pub use document_store::{DocumentStore, MediaChunk};
pub use llm::LlmProvider;
pub use profile::ProfileProvider;
pub use rapidapi::RapidApiProfileClient;
