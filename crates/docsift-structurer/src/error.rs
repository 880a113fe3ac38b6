//! Error types for the Structurer

use crate::schema::SchemaViolation;
use docsift_llm::LlmError;
use thiserror::Error;

/// Errors that can occur while structuring a document
#[derive(Error, Debug)]
pub enum StructurerError {
    /// LLM provider error (transport or provider failure)
    #[error("LLM error: {0}")]
    Model(#[from] LlmError),

    /// The model call did not finish in time
    #[error("Model call timed out after {0}s")]
    Timeout(u64),

    /// The reply is not valid JSON
    #[error("JSON parse error: {0}")]
    Parse(String),

    /// The reply is JSON but not a valid record
    #[error("Invalid record: {0}")]
    Schema(#[from] SchemaViolation),

    /// Document text exceeds the configured maximum and truncation is off
    #[error("Text too long: {len} chars (max: {max})")]
    InputTooLong {
        /// Length of the extracted text in characters
        len: usize,
        /// Configured maximum
        max: usize,
    },
}

impl StructurerError {
    /// Whether the failure lies with the provider rather than the reply content
    pub fn is_model_failure(&self) -> bool {
        matches!(self, StructurerError::Model(_) | StructurerError::Timeout(_))
    }
}

impl From<serde_json::Error> for StructurerError {
    fn from(e: serde_json::Error) -> Self {
        StructurerError::Parse(e.to_string())
    }
}
