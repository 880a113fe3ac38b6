//! Format dispatch: pick the extractor for a declared extension

use crate::config::IngestConfig;
use crate::error::{ExtractionError, IngestError};
use crate::image::ImageExtractor;
use crate::pdf::PdfExtractor;
use crate::spreadsheet::SpreadsheetExtractor;
use crate::TextExtractor;
use docsift_domain::{DocumentFormat, ExtractedText, UnsupportedFormatError, UploadedDocument};
use tokio::time::timeout;
use tracing::{debug, info};

/// Routes documents to the matching extractor
pub struct Dispatcher {
    pdf: PdfExtractor,
    spreadsheet: SpreadsheetExtractor,
    image: ImageExtractor,
    config: IngestConfig,
}

impl Dispatcher {
    /// Create a dispatcher with the standard extractor set
    pub fn new(config: IngestConfig) -> Self {
        Self {
            pdf: PdfExtractor::new(),
            spreadsheet: SpreadsheetExtractor::new(),
            image: ImageExtractor::new(&config.tesseract_binary, &config.ocr_language),
            config,
        }
    }

    /// Select the extractor for an extension
    ///
    /// A pure lookup: case-insensitive, leading dot optional.
    pub fn dispatch(&self, extension: &str) -> Result<&dyn TextExtractor, UnsupportedFormatError> {
        let format = DocumentFormat::from_extension(extension)?;
        Ok(self.extractor_for(format))
    }

    /// The extractor registered for a format
    pub fn extractor_for(&self, format: DocumentFormat) -> &dyn TextExtractor {
        match format {
            DocumentFormat::Pdf => &self.pdf,
            DocumentFormat::Spreadsheet => &self.spreadsheet,
            DocumentFormat::Image => &self.image,
        }
    }

    /// Dispatch and extract a staged document under the format's timeout
    ///
    /// Does not delete the staged file; that belongs to the caller.
    pub async fn extract(&self, document: &UploadedDocument) -> Result<ExtractedText, IngestError> {
        let extractor = self.dispatch(&document.extension)?;
        let format = extractor.format();
        let secs = self.config.timeout_secs(format);

        info!(
            "Extracting {} '{}' as {}",
            document.id, document.declared_name, format
        );

        let text = timeout(self.config.timeout(format), extractor.extract(&document.path))
            .await
            .map_err(|_| ExtractionError::Timeout { format, secs })??;

        debug!("Extracted {} chars from {}", text.len(), document.id);
        Ok(text)
    }

    /// Borrow the configuration
    pub fn config(&self) -> &IngestConfig {
        &self.config
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(IngestConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsift_domain::format::SUPPORTED_EXTENSIONS;
    use docsift_domain::DocumentId;

    #[test]
    fn test_dispatch_every_supported_extension() {
        let dispatcher = Dispatcher::default();
        let expected = [
            ("pdf", DocumentFormat::Pdf),
            (".PDF", DocumentFormat::Pdf),
            ("xlsx", DocumentFormat::Spreadsheet),
            (".xls", DocumentFormat::Spreadsheet),
            ("png", DocumentFormat::Image),
            (".jpg", DocumentFormat::Image),
            ("JPEG", DocumentFormat::Image),
        ];
        for (ext, format) in expected {
            assert_eq!(dispatcher.dispatch(ext).unwrap().format(), format, "{}", ext);
        }
        for ext in SUPPORTED_EXTENSIONS {
            assert!(dispatcher.dispatch(ext).is_ok());
        }
    }

    #[test]
    fn test_dispatch_rejects_unsupported() {
        let dispatcher = Dispatcher::default();
        for ext in [".docx", "csv", "", "gif", "pdf.exe"] {
            assert!(dispatcher.dispatch(ext).is_err(), "{} should be rejected", ext);
        }
    }

    #[tokio::test]
    async fn test_extract_unsupported_never_touches_file() {
        let dispatcher = Dispatcher::default();
        // The path does not exist: an extractor would fail with Io instead
        let document = UploadedDocument::new(DocumentId::new(), "/nonexistent/x.docx", "x.docx");

        let result = dispatcher.extract(&document).await;
        assert!(matches!(result, Err(IngestError::Unsupported(_))));
    }

    #[tokio::test]
    async fn test_extract_reports_extractor_failure() {
        let dispatcher = Dispatcher::default();
        let document = UploadedDocument::new(DocumentId::new(), "/nonexistent/x.pdf", "x.pdf");

        let result = dispatcher.extract(&document).await;
        assert!(matches!(
            result,
            Err(IngestError::Extraction(ExtractionError::Io(_)))
        ));
    }

    #[tokio::test]
    async fn test_extract_uses_configured_ocr_binary() {
        let config = IngestConfig {
            tesseract_binary: "docsift-no-such-ocr-binary".to_string(),
            ..IngestConfig::default()
        };
        let dispatcher = Dispatcher::new(config);
        let document = UploadedDocument::new(DocumentId::new(), "/tmp/scan.png", "scan.png");

        let result = dispatcher.extract(&document).await;
        assert!(matches!(
            result,
            Err(IngestError::Extraction(ExtractionError::BackendUnavailable(_)))
        ));
    }
}
