//! Response payloads

use serde::{Deserialize, Serialize};

/// Message sent with every successful analysis or sales-prep result
pub const SUCCESS_MESSAGE: &str = "File processed successfully";

/// Outcome marker carried in result payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    Success,
    Error,
}

/// Successful `/api/analyze` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub status: ResultStatus,
    pub message: String,
    /// Model output
    pub analysis: String,
}

impl AnalysisResult {
    pub fn success(analysis: String) -> Self {
        Self {
            status: ResultStatus::Success,
            message: SUCCESS_MESSAGE.to_string(),
            analysis,
        }
    }
}

/// Successful `/api/salesprep` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesPrepResult {
    pub status: ResultStatus,
    pub message: String,
    /// Model output
    #[serde(rename = "prepWork")]
    pub prep_work: String,
}

impl SalesPrepResult {
    pub fn success(prep_work: String) -> Self {
        Self {
            status: ResultStatus::Success,
            message: SUCCESS_MESSAGE.to_string(),
            prep_work,
        }
    }
}

/// Error body shared by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Client-safe reason
    pub error: String,
    /// `"error"`, or `"Failed"` for sales-prep server errors
    pub status: String,
}

/// `/api/health` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
            message: "Server is running".to_string(),
        }
    }
}
