//! Sales-prep endpoint

use axum::{body::Bytes, extract::State, Json};

use super::ApiError;
use crate::error::Result;
use crate::generation::PromptComposer;
use crate::server::state::AppState;
use crate::types::{resolve_file_id, SalesPrepRequest, SalesPrepResult};

/// POST /api/salesprep - Sales-prep notes from presentations and a profile
pub async fn sales_prep(
    State(state): State<AppState>,
    body: Bytes,
) -> std::result::Result<Json<SalesPrepResult>, ApiError> {
    let request = SalesPrepRequest::from_body(&body)?;
    let file_ids = request
        .presentations
        .iter()
        .map(|p| resolve_file_id(&p.download_url))
        .collect::<Result<Vec<_>>>()?;

    tracing::info!("Preparing sales notes from {} presentation(s)", file_ids.len());

    let sales_content = state
        .pipeline()
        .collect_text(&file_ids)
        .await
        .map_err(ApiError::failed)?;

    let profile = state
        .profile_provider()
        .fetch_profile(&request.linkedin_url)
        .await
        .map_err(ApiError::failed)?;

    let prompt = PromptComposer::sales_prep(&request.prompt, &profile, &sales_content);
    let prep_work = state
        .llm_provider()
        .generate(&prompt)
        .await
        .map_err(ApiError::failed)?;

    Ok(Json(SalesPrepResult::success(prep_work)))
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{pdf_bytes, post_json, TestApp};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_sales_prep_prompt_and_result() {
        let app = TestApp::new()
            .with_file("deck-1", pdf_bytes(&["Pricing"]))
            .with_file("deck-2", pdf_bytes(&["Roadmap"]));

        let (status, body) = post_json(
            app.router(),
            "/api/salesprep",
            json!({
                "linkedinUrl": "https://linkedin.com/in/jane",
                "prompt": "Prep me",
                "presentations": [{"downloadUrl": "deck-1"}, {"downloadUrl": "deck-2"}]
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(body["prepWork"], "model output");
        assert_eq!(app.profile.requests(), vec!["https://linkedin.com/in/jane".to_string()]);
        assert_eq!(
            app.llm.prompts(),
            vec![
                "Prep me\n\nLinkedin Content - {\"name\":\"Jane\"}\n\nSales Content - Pricing\nRoadmap\n"
                    .to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_presentations_rejected() {
        let app = TestApp::new();

        let (status, body) = post_json(
            app.router(),
            "/api/salesprep",
            json!({"linkedinUrl": "https://linkedin.com/in/jane", "prompt": "Prep me", "presentations": []}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "No ppt/pdf file selected", "status": "error"}));
        assert!(app.profile.requests().is_empty());
        assert!(app.llm.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_path_like_download_url_rejected() {
        let app = TestApp::new().with_file("deck-1", pdf_bytes(&["Pricing"]));

        let (status, body) = post_json(
            app.router(),
            "/api/salesprep",
            json!({
                "linkedinUrl": "https://linkedin.com/in/jane",
                "prompt": "Prep me",
                "presentations": [{"downloadUrl": "deck-1"}, {"downloadUrl": "x/../../about"}]
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid file URL", "status": "error"}));
        assert_eq!(app.store.request_count(), 0);
        assert!(app.profile.requests().is_empty());
    }

    #[tokio::test]
    async fn test_missing_prompt_rejected_before_network() {
        let app = TestApp::new().with_file("deck-1", pdf_bytes(&["Pricing"]));

        let (status, body) = post_json(
            app.router(),
            "/api/salesprep",
            json!({"linkedinUrl": "https://linkedin.com/in/jane", "presentations": [{"downloadUrl": "deck-1"}]}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Prompt is required");
        assert_eq!(app.store.request_count(), 0);
        assert!(app.profile.requests().is_empty());
    }

    #[tokio::test]
    async fn test_downstream_failure_labelled_failed() {
        let app = TestApp::new()
            .with_file("deck-1", pdf_bytes(&["Pricing"]))
            .with_failing_profile();

        let (status, body) = post_json(
            app.router(),
            "/api/salesprep",
            json!({
                "linkedinUrl": "https://linkedin.com/in/jane",
                "prompt": "Prep me",
                "presentations": [{"downloadUrl": "deck-1"}]
            }),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Profile enrichment failed", "status": "Failed"}));
        assert!(app.llm.prompts().is_empty());
    }
}
