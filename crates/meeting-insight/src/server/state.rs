//! Application state for the meeting-insight server

use std::sync::Arc;

use crate::config::InsightConfig;
use crate::error::Result;
use crate::ingestion::{IngestPipeline, PdfTextExtractor, TextExtractor};
use crate::providers::{
    gcp::{DriveDocumentStore, GcpAuth, GeminiClient},
    DocumentStore, LlmProvider, ProfileProvider, RapidApiProfileClient,
};

/// Shared application state
///
/// Built once at startup and read-only afterwards; cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: InsightConfig,
    /// Download + extraction pipeline
    pipeline: IngestPipeline,
    /// Profile enrichment provider
    profile_provider: Arc<dyn ProfileProvider>,
    /// LLM provider
    llm_provider: Arc<dyn LlmProvider>,
}

impl AppState {
    /// Create application state with the production clients
    pub fn new(config: InsightConfig) -> Result<Self> {
        tracing::info!("Initializing application state...");

        let auth = Arc::new(GcpAuth::from_config(&config.drive)?);
        tracing::info!("Drive credentials loaded for {}", auth.client_email());

        let store = Arc::new(DriveDocumentStore::new(auth, &config.drive)?);
        let profile = Arc::new(RapidApiProfileClient::new(&config.profile)?);
        let llm = Arc::new(GeminiClient::new(&config.llm)?);
        tracing::info!("Gemini client initialized (model: {})", config.llm.model);

        Ok(Self::from_parts(
            config,
            store,
            Arc::new(PdfTextExtractor),
            profile,
            llm,
        ))
    }

    /// Assemble state from already-built collaborators
    pub fn from_parts(
        config: InsightConfig,
        store: Arc<dyn DocumentStore>,
        extractor: Arc<dyn TextExtractor>,
        profile_provider: Arc<dyn ProfileProvider>,
        llm_provider: Arc<dyn LlmProvider>,
    ) -> Self {
        let pipeline = IngestPipeline::new(store, extractor, &config);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pipeline,
                profile_provider,
                llm_provider,
            }),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &InsightConfig {
        &self.inner.config
    }

    /// Get the download + extraction pipeline
    pub fn pipeline(&self) -> &IngestPipeline {
        &self.inner.pipeline
    }

    /// Get profile provider
    pub fn profile_provider(&self) -> &Arc<dyn ProfileProvider> {
        &self.inner.profile_provider
    }

    /// Get LLM provider
    pub fn llm_provider(&self) -> &Arc<dyn LlmProvider> {
        &self.inner.llm_provider
    }
}
