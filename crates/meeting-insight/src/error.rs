//! Error types for the meeting-insight service
//!
//! Internal failures are collapsed into a small, closed set of kinds. Each kind
//! carries full detail for the server log, while [`Error::user_message`] is the
//! only text that ever reaches an HTTP client.

use axum::http::StatusCode;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Service error kinds
#[derive(Debug, Error)]
pub enum Error {
    /// Request body failed a validation gate (message is client-safe)
    #[error("{0}")]
    Validation(String),

    /// A remote service could not be reached
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The storage service rejected a chunk request
    #[error("Download error: {0}")]
    Download(String),

    /// Downloaded bytes could not be turned into text
    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    /// The profile API returned an unusable response
    #[error("Profile enrichment failed: {0}")]
    ProfileFailed(String),

    /// The generative model call failed
    #[error("Inference failed: {0}")]
    InferenceFailed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// HTTP status for this error kind
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message without internal detail
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation(message) => message.clone(),
            Error::UpstreamUnavailable(_) => "Upstream service unavailable".to_string(),
            Error::Download(_) => "Document download failed".to_string(),
            Error::ExtractionFailed(_) => "Failed to extract document text".to_string(),
            Error::ProfileFailed(_) => "Profile enrichment failed".to_string(),
            Error::InferenceFailed(_) => "Content generation failed".to_string(),
            Error::Config(_) | Error::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Internal(format!("JSON error: {}", err))
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        Error::ExtractionFailed(format!("Failed to load PDF: {}", err))
    }
}
