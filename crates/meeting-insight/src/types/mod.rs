//! Core types for the meeting-insight service

pub mod request;
pub mod response;

pub use request::{resolve_file_id, AnalysisRequest, Presentation, SalesPrepRequest};
pub use response::{AnalysisResult, ErrorBody, HealthResponse, ResultStatus, SalesPrepResult};
