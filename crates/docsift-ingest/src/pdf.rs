//! PDF text extraction using pdf-extract

use crate::{ExtractionError, TextExtractor};
use async_trait::async_trait;
use docsift_domain::{DocumentFormat, ExtractedText};
use std::path::Path;
use tracing::debug;

/// Flattens a PDF into one string, page by page
///
/// Layout and columns are not preserved.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    /// Create a new PDF extractor
    pub fn new() -> Self {
        Self
    }

    /// Extract text from an in-memory PDF
    pub fn extract_from_mem(data: &[u8]) -> Result<ExtractedText, ExtractionError> {
        let pages = pdf_extract::extract_text_from_mem_by_pages(data)
            .map_err(|e| ExtractionError::Pdf(e.to_string()))?;
        debug!("PDF has {} pages", pages.len());
        Ok(join_pages(&pages))
    }
}

#[async_trait]
impl TextExtractor for PdfExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pdf
    }

    async fn extract(&self, path: &Path) -> Result<ExtractedText, ExtractionError> {
        let data = tokio::fs::read(path).await?;
        // pdf-extract is CPU-bound and may panic on malformed input
        tokio::task::spawn_blocking(move || Self::extract_from_mem(&data)).await?
    }
}

/// Join pages in order: items on a page separated by single spaces, pages by `\n`
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    pages
        .iter()
        .map(|page| flatten_page(page.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn flatten_page(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_page_collapses_whitespace() {
        assert_eq!(
            flatten_page("T A X   INVOICE\n\nInvoice #:\tINV-1526  "),
            "T A X INVOICE Invoice #: INV-1526"
        );
    }

    #[test]
    fn test_join_pages_preserves_order() {
        let pages = vec!["Page one\nheader", "Page  two", "Page three"];
        let text = join_pages(&pages);
        assert_eq!(text, "Page one header\nPage two\nPage three");

        let one = text.find("Page one").unwrap();
        let two = text.find("Page two").unwrap();
        let three = text.find("Page three").unwrap();
        assert!(one < two && two < three);
    }

    #[test]
    fn test_join_pages_keeps_blank_pages() {
        let pages = vec!["first", "   ", "third"];
        assert_eq!(join_pages(&pages), "first\n\nthird");
    }

    #[test]
    fn test_join_no_pages() {
        let pages: Vec<String> = Vec::new();
        assert_eq!(join_pages(&pages), "");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let result = PdfExtractor::new()
            .extract(Path::new("/nonexistent/docsift/missing.pdf"))
            .await;
        assert!(matches!(result, Err(ExtractionError::Io(_))));
    }

    #[tokio::test]
    async fn test_garbage_file_fails_without_panicking() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"not a pdf at all").unwrap();

        let result = PdfExtractor::new().extract(&path).await;
        assert!(matches!(
            result,
            Err(ExtractionError::Pdf(_)) | Err(ExtractionError::Join(_))
        ));
    }
}
