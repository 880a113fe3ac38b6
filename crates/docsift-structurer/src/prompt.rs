//! Prompt assembly for document structuring

use crate::exemplars::{exemplars, INSTRUCTION};
use docsift_domain::PromptPayload;

/// Builds the payload sent to the model for one document
///
/// The instruction and exemplars are constants; only the document text
/// varies, so equal text always yields an equal payload.
pub struct PromptBuilder {
    text: String,
}

impl PromptBuilder {
    /// Create a new prompt builder for a document's text
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Build the complete payload
    pub fn build(self) -> PromptPayload {
        PromptPayload {
            instruction: INSTRUCTION.to_string(),
            exemplars: exemplars(),
            document_text: self.text,
        }
    }
}

/// The longest prefix of `text` holding at most `max_chars` characters
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_is_deterministic() {
        let a = PromptBuilder::new("Invoice 42").build();
        let b = PromptBuilder::new("Invoice 42").build();
        assert_eq!(a, b);
        assert_eq!(a.render(), b.render());
    }

    #[test]
    fn test_only_document_text_varies() {
        let a = PromptBuilder::new("first").build();
        let b = PromptBuilder::new("second").build();
        assert_eq!(a.instruction, b.instruction);
        assert_eq!(a.exemplars, b.exemplars);
        assert_ne!(a.document_text, b.document_text);
    }

    #[test]
    fn test_rendered_prompt_ends_with_document() {
        let payload = PromptBuilder::new("Customer: Ravi").build();
        let rendered = payload.render();
        assert!(rendered.starts_with("### Example 1\n"));
        assert!(rendered.ends_with("Document Text:\nCustomer: Ravi\n\nAnswer:\n"));
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 0), "");
        // Multi-byte characters are never split
        assert_eq!(truncate_chars("₹₹₹₹", 2), "₹₹");
    }
}
