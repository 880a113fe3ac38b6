//! Docsift Structurer
//!
//! Converts extracted document text into a structured record using an LLM.
//!
//! # Overview
//!
//! The structurer builds a deterministic prompt (fixed instruction plus a
//! versioned set of worked examples), sends it to the model, and accepts the
//! reply only if it is a JSON object that matches the record schema:
//! customer groups holding scalar fields and parallel line-item arrays, plus
//! document-wide summary values.
//!
//! # Architecture
//!
//! ```text
//! ExtractedText → PromptBuilder → LlmProvider → parser → schema → StructuredRecord
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use docsift_structurer::{Structurer, StructurerConfig};
//! use docsift_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::new(r#"{"Navya Sri": {"Product Name": ["Racket"], "Quantity": [7]}}"#);
//! let structurer = Structurer::from_provider(llm, StructurerConfig::default());
//!
//! let record = structurer.structure_text("Consignee: Navya Sri ...").await?;
//! println!("{} parties", record.parties().count());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod exemplars;
mod parser;
mod prompt;
mod schema;
mod structurer;


pub use config::{OversizePolicy, StructurerConfig};
pub use error::StructurerError;
pub use exemplars::{exemplars, EXEMPLAR_SET_VERSION, INSTRUCTION};
pub use parser::parse_llm_response;
pub use prompt::{truncate_chars, PromptBuilder};
pub use schema::{validate_record, SchemaViolation, LINE_ITEM_FIELDS};
pub use structurer::Structurer;
