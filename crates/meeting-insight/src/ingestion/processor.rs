//! Download-and-extract pipeline shared by both endpoints

use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use super::extractor::{append_pages, TextExtractor};
use super::fetcher::{DocumentFetcher, DownloadOutcome};
use crate::config::{DownloadFailurePolicy, InsightConfig};
use crate::error::{Error, Result};
use crate::providers::DocumentStore;

/// Fetches each file, extracts its pages, and accumulates the text
#[derive(Clone)]
pub struct IngestPipeline {
    fetcher: DocumentFetcher,
    extractor: Arc<dyn TextExtractor>,
    policy: DownloadFailurePolicy,
    extraction_timeout: Duration,
}

impl IngestPipeline {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        extractor: Arc<dyn TextExtractor>,
        config: &InsightConfig,
    ) -> Self {
        Self {
            fetcher: DocumentFetcher::new(store, config.drive.chunk_size),
            extractor,
            policy: config.ingestion.download_failure_policy,
            extraction_timeout: Duration::from_secs(config.ingestion.extraction_timeout_secs),
        }
    }

    /// Download and extract every file in order, returning the combined text
    pub async fn collect_text(&self, file_ids: &[String]) -> Result<String> {
        let mut text = String::new();

        for file_id in file_ids {
            let (data, interrupted) = match self.fetcher.fetch(file_id).await {
                DownloadOutcome::Complete(data) => (data, false),
                DownloadOutcome::Interrupted { partial, error } => match self.policy {
                    DownloadFailurePolicy::KeepPartial => {
                        tracing::warn!(
                            "Continuing with {} bytes of {} after download error",
                            partial.len(),
                            file_id
                        );
                        (partial, true)
                    }
                    DownloadFailurePolicy::Abort => return Err(error),
                },
            };

            if data.is_empty() {
                continue;
            }

            let pages = match self.extract(data).await {
                Ok(pages) => pages,
                // A truncated file rarely parses; it contributes no text
                Err(e) if interrupted => {
                    tracing::warn!("Skipping partial download of {}: {}", file_id, e);
                    continue;
                }
                Err(e) => return Err(e),
            };
            tracing::debug!("Extracted {} pages from {}", pages.len(), file_id);
            append_pages(&mut text, &pages);
        }

        Ok(text)
    }

    /// Run the extractor on the blocking pool, bounded by the extraction timeout
    async fn extract(&self, data: Vec<u8>) -> Result<Vec<String>> {
        let extractor = Arc::clone(&self.extractor);
        let task = tokio::task::spawn_blocking(move || extractor.extract_pages(&data));

        match timeout(self.extraction_timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => Err(Error::Internal(format!("Extraction task failed: {}", e))),
            Err(_) => Err(Error::ExtractionFailed(format!(
                "Extraction timed out after {}s",
                self.extraction_timeout.as_secs()
            ))),
        }
    }
}
