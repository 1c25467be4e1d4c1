//! Transcript analysis endpoint

use axum::{body::Bytes, extract::State, Json};

use super::ApiError;
use crate::error::Result;
use crate::generation::PromptComposer;
use crate::server::state::AppState;
use crate::types::{resolve_file_id, AnalysisRequest, AnalysisResult};

/// POST /api/analyze - Analyze transcript PDFs with a prompt
pub async fn analyze_transcripts(
    State(state): State<AppState>,
    body: Bytes,
) -> std::result::Result<Json<AnalysisResult>, ApiError> {
    let request = AnalysisRequest::from_body(&body)?;
    let file_ids = request
        .files
        .iter()
        .map(|url| resolve_file_id(url))
        .collect::<Result<Vec<_>>>()?;

    tracing::info!("Analyzing {} transcript file(s)", file_ids.len());

    let transcript = state.pipeline().collect_text(&file_ids).await?;
    let prompt = PromptComposer::analysis(&request.prompt, &transcript);

    let analysis = state.llm_provider().generate(&prompt).await?;
    tracing::info!(
        "Analysis generated by {} ({} chars)",
        state.llm_provider().model(),
        analysis.len()
    );

    Ok(Json(AnalysisResult::success(analysis)))
}
