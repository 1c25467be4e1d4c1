//! Document ingestion: chunked download and PDF text extraction

pub mod extractor;
pub mod fetcher;
mod processor;

pub use extractor::{append_pages, PdfTextExtractor, TextExtractor};
pub use fetcher::{DocumentFetcher, DownloadOutcome};
pub use processor::IngestPipeline;
