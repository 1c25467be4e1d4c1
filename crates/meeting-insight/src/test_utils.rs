//! Shared fixtures for router-level tests

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use crate::config::InsightConfig;
use crate::error::{Error, Result};
use crate::ingestion::fetcher::tests::MemoryStore;
use crate::ingestion::PdfTextExtractor;
use crate::providers::{LlmProvider, ProfileProvider};
use crate::server::{build_router, state::AppState};

pub(crate) use crate::ingestion::extractor::tests::build_pdf as pdf_bytes;

/// LLM double that records every prompt
#[derive(Default)]
pub(crate) struct RecordingLlm {
    failing: bool,
    prompts: Mutex<Vec<String>>,
}

impl RecordingLlm {
    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for RecordingLlm {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if self.failing {
            return Err(Error::InferenceFailed("quota exceeded".to_string()));
        }
        Ok("model output".to_string())
    }

    fn name(&self) -> &str {
        "recording"
    }

    fn model(&self) -> &str {
        "test-model"
    }
}

/// Profile double that records every requested URL
#[derive(Default)]
pub(crate) struct RecordingProfile {
    failing: bool,
    requests: Mutex<Vec<String>>,
}

impl RecordingProfile {
    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProfileProvider for RecordingProfile {
    async fn fetch_profile(&self, profile_url: &str) -> Result<serde_json::Value> {
        self.requests.lock().unwrap().push(profile_url.to_string());
        if self.failing {
            return Err(Error::ProfileFailed("HTTP 429".to_string()));
        }
        Ok(serde_json::json!({ "name": "Jane" }))
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// Application wired with in-memory collaborators
pub(crate) struct TestApp {
    pub store: Arc<MemoryStore>,
    pub llm: Arc<RecordingLlm>,
    pub profile: Arc<RecordingProfile>,
    pub config: InsightConfig,
}

impl TestApp {
    pub(crate) fn new() -> Self {
        Self {
            store: Arc::new(MemoryStore::default()),
            llm: Arc::new(RecordingLlm::default()),
            profile: Arc::new(RecordingProfile::default()),
            config: InsightConfig::default(),
        }
    }

    fn store_mut(&mut self) -> &mut MemoryStore {
        Arc::get_mut(&mut self.store).expect("store configured after router was built")
    }

    pub(crate) fn with_file(mut self, id: &str, data: Vec<u8>) -> Self {
        self.store_mut().files.insert(id.to_string(), data);
        self
    }

    pub(crate) fn with_failing_file(self, id: &str) -> Self {
        self.with_file_failing_at(id, 0)
    }

    /// Fail `id` once `offset` bytes have been served
    pub(crate) fn with_file_failing_at(mut self, id: &str, offset: u64) -> Self {
        self.store_mut().fail_at.insert(id.to_string(), offset);
        self
    }

    pub(crate) fn with_chunk_size(mut self, chunk_size: u64) -> Self {
        self.config.drive.chunk_size = chunk_size;
        self
    }

    pub(crate) fn with_failing_llm(mut self) -> Self {
        self.llm = Arc::new(RecordingLlm {
            failing: true,
            ..Default::default()
        });
        self
    }

    pub(crate) fn with_failing_profile(mut self) -> Self {
        self.profile = Arc::new(RecordingProfile {
            failing: true,
            ..Default::default()
        });
        self
    }

    pub(crate) fn router(&self) -> Router {
        let state = AppState::from_parts(
            self.config.clone(),
            self.store.clone(),
            Arc::new(PdfTextExtractor),
            self.profile.clone(),
            self.llm.clone(),
        );
        build_router(state)
    }
}

/// Send a request and decode the JSON response
pub(crate) async fn send(
    router: Router,
    request: Request<Body>,
) -> (StatusCode, HeaderMap, serde_json::Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, body)
}

/// POST a JSON body and decode the JSON response
pub(crate) async fn post_json(
    router: Router,
    path: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::post(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, _, body) = send(router, request).await;
    (status, body)
}
