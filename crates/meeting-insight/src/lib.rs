//! meeting-insight: Meeting transcript analysis and sales-prep notes
//!
//! Downloads PDF transcripts and slide decks from Google Drive, extracts their
//! text page by page, optionally enriches the request with a public LinkedIn
//! profile, and asks Gemini to produce the analysis or prep notes.

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod server;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use config::InsightConfig;
pub use error::{Error, Result};
pub use types::{AnalysisRequest, AnalysisResult, SalesPrepRequest, SalesPrepResult};
