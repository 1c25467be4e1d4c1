//! Document store provider trait for chunked file downloads

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;

/// One piece of a remote file
#[derive(Debug, Clone, Default)]
pub struct MediaChunk {
    /// Bytes received for this chunk
    pub data: Bytes,
    /// Total file size, when the service reports it
    pub total_size: Option<u64>,
}

impl MediaChunk {
    /// Chunk for a response that carried the whole file
    pub fn whole(data: Bytes) -> Self {
        let total_size = Some(data.len() as u64);
        Self { data, total_size }
    }
}

/// Trait for remote file storage that serves content in byte ranges
///
/// Implementations:
/// - `DriveDocumentStore`: Google Drive v3 (service account)
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch up to `chunk_size` bytes of `file_id` starting at `offset`
    async fn fetch_chunk(&self, file_id: &str, offset: u64, chunk_size: u64) -> Result<MediaChunk>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
