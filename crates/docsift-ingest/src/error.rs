//! Error types for text extraction

use docsift_domain::{DocumentFormat, UnsupportedFormatError};
use thiserror::Error;

/// Errors raised by an individual extractor
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Reading the staged file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The PDF could not be parsed
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    /// The workbook could not be opened or a sheet could not be read
    #[error("Spreadsheet extraction failed: {0}")]
    Spreadsheet(String),

    /// The OCR engine ran but failed
    #[error("OCR failed: {0}")]
    Ocr(String),

    /// A required external program is missing
    #[error("Extraction backend not available: {0}")]
    BackendUnavailable(String),

    /// Extraction did not finish in time
    #[error("{format} extraction timed out after {secs}s")]
    Timeout {
        /// Format being extracted
        format: DocumentFormat,
        /// Configured limit
        secs: u64,
    },

    /// The blocking extraction task panicked or was cancelled
    #[error("Extraction task failed: {0}")]
    Join(String),
}

/// Errors from dispatching and extracting an uploaded document
#[derive(Error, Debug)]
pub enum IngestError {
    /// No extractor for the declared extension
    #[error(transparent)]
    Unsupported(#[from] UnsupportedFormatError),

    /// The selected extractor failed
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

impl From<tokio::task::JoinError> for ExtractionError {
    fn from(e: tokio::task::JoinError) -> Self {
        ExtractionError::Join(e.to_string())
    }
}
