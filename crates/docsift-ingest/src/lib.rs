//! Docsift Ingest
//!
//! Turns an uploaded file into plain text.
//!
//! # Architecture
//!
//! ```text
//! UploadedDocument → Dispatcher → { PdfExtractor | SpreadsheetExtractor | ImageExtractor } → ExtractedText
//! ```
//!
//! Every extractor converges on the same output type, so the structuring
//! pipeline downstream never needs to know which format it came from.
//!
//! # Example Usage
//!
//! ```no_run
//! use docsift_ingest::{Dispatcher, IngestConfig};
//! use docsift_domain::{DocumentId, UploadedDocument};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dispatcher = Dispatcher::new(IngestConfig::default());
//! let document = UploadedDocument::new(DocumentId::new(), "uploads/sales.xlsx", "sales.xlsx");
//!
//! let text = dispatcher.extract(&document).await?;
//! println!("{}", text);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod dispatch;
mod error;
mod image;
mod pdf;
mod spreadsheet;

use async_trait::async_trait;
use docsift_domain::{DocumentFormat, ExtractedText};
use std::path::Path;

pub use config::IngestConfig;
pub use dispatch::Dispatcher;
pub use error::{ExtractionError, IngestError};
pub use image::ImageExtractor;
pub use pdf::{join_pages, PdfExtractor};
pub use spreadsheet::{render_csv, SpreadsheetExtractor};

/// Converts one file format into plain text
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// The format this extractor handles
    fn format(&self) -> DocumentFormat;

    /// Read the file at `path` and return its text
    async fn extract(&self, path: &Path) -> Result<ExtractedText, ExtractionError>;
}
