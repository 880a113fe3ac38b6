//! Docsift Domain Layer
//!
//! Core value types shared by every docsift crate. Infrastructure (text
//! extraction, model providers, HTTP) lives in other crates and depends on
//! this one.
//!
//! ## Key Concepts
//!
//! - **DocumentFormat**: The family of an uploaded file, derived from its extension
//! - **UploadedDocument**: A staged upload owned by a single request
//! - **ExtractedText**: Plain text produced by an extractor
//! - **PromptPayload**: Instruction + fixed exemplars + document text
//! - **StructuredRecord**: The JSON object returned by the structuring step

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod format;
pub mod prompt;
pub mod record;

// Re-exports for convenience
pub use document::{DocumentId, UploadedDocument};
pub use format::{DocumentFormat, UnsupportedFormatError};
pub use prompt::{Exemplar, PromptPayload};
pub use record::StructuredRecord;

/// Normalized textual content of one document.
///
/// Always a single string, possibly empty. Spreadsheets are flattened row by
/// row, PDFs page by page, images are OCR'd.
pub type ExtractedText = String;
