//! Google Drive document store
//!
//! Serves file content in byte ranges via `files.get?alt=media`.

use async_trait::async_trait;
use reqwest::header::{CONTENT_RANGE, RANGE};
use reqwest::{StatusCode, Url};
use std::sync::Arc;
use std::time::Duration;

use super::auth::GcpAuth;
use crate::config::DriveConfig;
use crate::error::{Error, Result};
use crate::providers::document_store::{DocumentStore, MediaChunk};

/// Google Drive v3 document store
pub struct DriveDocumentStore {
    auth: Arc<GcpAuth>,
    client: reqwest::Client,
    api_base: Url,
}

impl DriveDocumentStore {
    /// Create a new Drive document store
    pub fn new(auth: Arc<GcpAuth>, config: &DriveConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to build HTTP client: {}", e)))?;

        let api_base = Url::parse(&config.api_base)
            .map_err(|e| Error::Config(format!("Invalid Drive API base {}: {}", config.api_base, e)))?;
        if api_base.cannot_be_a_base() {
            return Err(Error::Config(format!("Invalid Drive API base {}", config.api_base)));
        }

        Ok(Self {
            auth,
            client,
            api_base,
        })
    }

    /// Media download URL for a file; the ID is always a single escaped segment
    fn media_url(&self, file_id: &str) -> Url {
        let mut url = self.api_base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("files").push(file_id);
        }
        url
    }
}

/// Total size from a `Content-Range: bytes 0-99/1234` header
fn total_from_content_range(value: &str) -> Option<u64> {
    value
        .rsplit('/')
        .next()
        .filter(|total| *total != "*")
        .and_then(|total| total.trim().parse().ok())
}

#[async_trait]
impl DocumentStore for DriveDocumentStore {
    async fn fetch_chunk(&self, file_id: &str, offset: u64, chunk_size: u64) -> Result<MediaChunk> {
        let token = self.auth.get_token().await?;
        let range_end = offset + chunk_size.max(1) - 1;

        let response = self
            .client
            .get(self.media_url(file_id))
            .query(&[("alt", "media"), ("supportsAllDrives", "true")])
            .bearer_auth(token)
            .header(RANGE, format!("bytes={}-{}", offset, range_end))
            .send()
            .await
            .map_err(|e| Error::UpstreamUnavailable(format!("Drive request failed: {}", e)))?;

        let status = response.status();

        // Asking past the end of a file whose size was not known up front
        if status == StatusCode::RANGE_NOT_SATISFIABLE && offset > 0 {
            return Ok(MediaChunk {
                data: Default::default(),
                total_size: Some(offset),
            });
        }

        // Range ignored: the body restarts at byte 0
        if status == StatusCode::OK && offset > 0 {
            return Err(Error::Download(format!(
                "Drive ignored the range request for {} at offset {}",
                file_id, offset
            )));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Download(format!(
                "Drive download of {} failed ({}): {}",
                file_id, status, body
            )));
        }

        let total_size = if status == StatusCode::PARTIAL_CONTENT {
            response
                .headers()
                .get(CONTENT_RANGE)
                .and_then(|v| v.to_str().ok())
                .and_then(total_from_content_range)
        } else {
            None
        };

        let data = response
            .bytes()
            .await
            .map_err(|e| Error::Download(format!("Failed to read Drive response body: {}", e)))?;

        // A 200 carries the whole file
        if status != StatusCode::PARTIAL_CONTENT {
            return Ok(MediaChunk::whole(data));
        }

        Ok(MediaChunk { data, total_size })
    }

    fn name(&self) -> &str {
        "google-drive"
    }
}
