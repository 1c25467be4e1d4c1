//! PDF text extraction

use crate::error::Result;

/// Turns document bytes into per-page text
pub trait TextExtractor: Send + Sync {
    /// Text of every page, in page order
    fn extract_pages(&self, data: &[u8]) -> Result<Vec<String>>;
}

/// lopdf-backed PDF extractor
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract_pages(&self, data: &[u8]) -> Result<Vec<String>> {
        let doc = lopdf::Document::load_mem(data)?;

        let pages = doc.get_pages();
        tracing::debug!("PDF has {} pages", pages.len());

        let texts = pages
            .keys()
            .map(|&page_number| match doc.extract_text(&[page_number]) {
                Ok(text) => text.replace('\0', ""),
                Err(e) => {
                    tracing::debug!("Could not extract text for page {}: {}", page_number, e);
                    String::new()
                }
            })
            .collect();

        Ok(texts)
    }
}

/// Append pages to `buffer`, each followed by exactly one newline
pub fn append_pages(buffer: &mut String, pages: &[String]) {
    for page in pages {
        buffer.push_str(page.trim_end_matches(['\r', '\n']));
        buffer.push('\n');
    }
}
