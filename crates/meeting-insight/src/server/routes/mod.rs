//! API routes for the meeting-insight server

pub mod analyze;
pub mod salesprep;

use axum::{
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use crate::error::Error;
use crate::server::state::AppState;
use crate::types::{ErrorBody, HealthResponse};

/// Build all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/analyze", post(analyze::analyze_transcripts))
        .route("/salesprep", post(salesprep::sales_prep))
        .route("/health", get(health_check))
        .route("/info", get(info))
}

/// Handler error: an [`Error`] plus the status label written to the body
#[derive(Debug)]
pub struct ApiError {
    error: Error,
    label: &'static str,
}

impl ApiError {
    /// Label used for server errors on the sales-prep endpoint
    pub const FAILED: &'static str = "Failed";

    /// Relabel server-side failures; validation errors keep `"error"`
    pub fn failed(error: Error) -> Self {
        let label = match error {
            Error::Validation(_) => "error",
            _ => Self::FAILED,
        };
        Self { error, label }
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        Self {
            error,
            label: "error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.error.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.error);
        } else {
            tracing::info!("Request rejected: {}", self.error);
        }

        let body = ErrorBody {
            error: self.error.user_message(),
            status: self.label.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// GET /api/health - Liveness probe
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// GET /api/info - Service description
async fn info() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "meeting-insight",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Meeting transcript analysis and sales-prep notes from Google Drive documents",
        "endpoints": {
            "POST /api/analyze": "Analyze transcript PDFs with a prompt",
            "POST /api/salesprep": "Sales-prep notes from presentations and a LinkedIn profile",
            "GET /api/health": "Liveness probe",
            "GET /api/info": "This document"
        }
    }))
}
