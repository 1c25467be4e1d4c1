//! Chunked document download

use std::sync::Arc;

use crate::error::Error;
use crate::providers::DocumentStore;

/// Result of downloading one file
///
/// Exhaustion and failure are kept apart so the caller can apply its own
/// policy to partial data.
#[derive(Debug)]
pub enum DownloadOutcome {
    /// Every byte of the file arrived
    Complete(Vec<u8>),
    /// A chunk request failed; `partial` holds what arrived before it
    Interrupted { partial: Vec<u8>, error: Error },
}

/// Downloads whole files from a [`DocumentStore`], one chunk at a time
#[derive(Clone)]
pub struct DocumentFetcher {
    store: Arc<dyn DocumentStore>,
    chunk_size: u64,
}

impl DocumentFetcher {
    pub fn new(store: Arc<dyn DocumentStore>, chunk_size: u64) -> Self {
        Self {
            store,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Request chunks until the store reports completion or a request fails
    pub async fn fetch(&self, file_id: &str) -> DownloadOutcome {
        let mut buffer: Vec<u8> = Vec::new();

        loop {
            let offset = buffer.len() as u64;
            let chunk = match self.store.fetch_chunk(file_id, offset, self.chunk_size).await {
                Ok(chunk) => chunk,
                Err(error) => {
                    tracing::warn!(
                        "An error occurred downloading {} from {}: {}",
                        file_id,
                        self.store.name(),
                        error
                    );
                    return DownloadOutcome::Interrupted {
                        partial: buffer,
                        error,
                    };
                }
            };

            let received = chunk.data.len() as u64;
            buffer.extend_from_slice(&chunk.data);
            let downloaded = buffer.len() as u64;

            let done = received == 0
                || match chunk.total_size {
                    Some(total) => downloaded >= total,
                    None => received < self.chunk_size,
                };

            let percent = match chunk.total_size {
                Some(total) if total > 0 => (downloaded.min(total) * 100) / total,
                _ if done => 100,
                _ => 0,
            };
            tracing::info!("Download {}%.", percent);

            if done {
                return DownloadOutcome::Complete(buffer);
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::Result;
    use crate::providers::MediaChunk;
    use async_trait::async_trait;
    use bytes::Bytes;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory store serving ranged reads; files listed in `fail_at` error
    /// once the given offset is reached
    #[derive(Default)]
    pub(crate) struct MemoryStore {
        pub files: HashMap<String, Vec<u8>>,
        pub fail_at: HashMap<String, u64>,
        pub report_total: bool,
        pub requests: Mutex<Vec<(String, u64)>>,
    }

    impl MemoryStore {
        pub(crate) fn with_file(mut self, id: &str, data: Vec<u8>) -> Self {
            self.files.insert(id.to_string(), data);
            self
        }

        pub(crate) fn failing_at(mut self, id: &str, offset: u64) -> Self {
            self.fail_at.insert(id.to_string(), offset);
            self
        }

        pub(crate) fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl DocumentStore for MemoryStore {
        async fn fetch_chunk(&self, file_id: &str, offset: u64, chunk_size: u64) -> Result<MediaChunk> {
            self.requests.lock().unwrap().push((file_id.to_string(), offset));

            if let Some(&fail) = self.fail_at.get(file_id) {
                if offset >= fail {
                    return Err(Error::Download(format!("HttpError 500 for {}", file_id)));
                }
            }

            let data = self
                .files
                .get(file_id)
                .ok_or_else(|| Error::Download(format!("HttpError 404 for {}", file_id)))?;

            let start = (offset as usize).min(data.len());
            let end = (start + chunk_size as usize).min(data.len());
            Ok(MediaChunk {
                data: Bytes::copy_from_slice(&data[start..end]),
                total_size: self.report_total.then_some(data.len() as u64),
            })
        }

        fn name(&self) -> &str {
            "memory"
        }
    }

    #[tokio::test]
    async fn test_single_chunk() {
        let store = Arc::new(MemoryStore::default().with_file("f", b"hello".to_vec()));
        let fetcher = DocumentFetcher::new(store.clone(), 1024);

        match fetcher.fetch("f").await {
            DownloadOutcome::Complete(data) => assert_eq!(data, b"hello"),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(store.request_count(), 1);
    }

    #[tokio::test]
    async fn test_multiple_chunks_with_total() {
        let store = Arc::new(MemoryStore {
            report_total: true,
            ..MemoryStore::default()
        }
        .with_file("f", b"0123456789".to_vec()));
        let fetcher = DocumentFetcher::new(store.clone(), 4);

        match fetcher.fetch("f").await {
            DownloadOutcome::Complete(data) => assert_eq!(data, b"0123456789"),
            other => panic!("unexpected outcome: {other:?}"),
        }
        // 0..4, 4..8, 8..10
        assert_eq!(store.request_count(), 3);
    }

    #[tokio::test]
    async fn test_exact_multiple_without_total() {
        let store = Arc::new(MemoryStore::default().with_file("f", b"01234567".to_vec()));
        let fetcher = DocumentFetcher::new(store.clone(), 4);

        match fetcher.fetch("f").await {
            DownloadOutcome::Complete(data) => assert_eq!(data, b"01234567"),
            other => panic!("unexpected outcome: {other:?}"),
        }
        // Trailing empty chunk signals the end
        assert_eq!(store.request_count(), 3);
    }

    #[tokio::test]
    async fn test_error_on_first_chunk() {
        let store = Arc::new(
            MemoryStore::default()
                .with_file("f", b"data".to_vec())
                .failing_at("f", 0),
        );
        let fetcher = DocumentFetcher::new(store.clone(), 1024);

        match fetcher.fetch("f").await {
            DownloadOutcome::Interrupted { partial, error } => {
                assert!(partial.is_empty());
                assert!(matches!(error, Error::Download(_)));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        // No retry
        assert_eq!(store.request_count(), 1);
    }

    #[tokio::test]
    async fn test_error_mid_download_keeps_prefix() {
        let store = Arc::new(
            MemoryStore::default()
                .with_file("f", b"0123456789".to_vec())
                .failing_at("f", 4),
        );
        let fetcher = DocumentFetcher::new(store, 4);

        match fetcher.fetch("f").await {
            DownloadOutcome::Interrupted { partial, .. } => assert_eq!(partial, b"0123"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
