//! Prompt module - the request sent to the structuring model

use serde::{Deserialize, Serialize};

/// A fixed worked example pairing sample document text with the desired JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exemplar {
    /// Sample document text, as an extractor would produce it
    pub input: String,

    /// The JSON answer the model should give for `input`
    pub output: String,
}

impl Exemplar {
    /// Create an exemplar from borrowed constants
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }
}

/// Instruction, ordered exemplars and the per-request document text
///
/// `instruction` and `exemplars` come from versioned constants and must stay
/// byte-stable across requests; `document_text` is the only variable part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptPayload {
    /// Extraction instruction
    pub instruction: String,

    /// Few-shot examples in presentation order
    pub exemplars: Vec<Exemplar>,

    /// Extracted text of the uploaded document
    pub document_text: String,
}

impl PromptPayload {
    /// The instruction followed by a document, as sent in a single user turn
    ///
    /// Multi-turn providers send each exemplar as its own user/model exchange
    /// built with this same function so the final turn matches the examples.
    pub fn user_turn(instruction: &str, document_text: &str) -> String {
        let mut turn = String::with_capacity(instruction.len() + document_text.len() + 32);
        turn.push_str(instruction);
        turn.push_str("\n\nDocument Text:\n");
        turn.push_str(document_text);
        turn
    }

    /// The final user turn for this payload
    pub fn final_turn(&self) -> String {
        Self::user_turn(&self.instruction, &self.document_text)
    }

    /// Flatten the payload into one prompt string
    ///
    /// Used by providers without a multi-turn conversation API.
    pub fn render(&self) -> String {
        let mut prompt = String::new();
        for (idx, exemplar) in self.exemplars.iter().enumerate() {
            prompt.push_str(&format!("### Example {}\n", idx + 1));
            prompt.push_str(&Self::user_turn(&self.instruction, &exemplar.input));
            prompt.push_str("\n\nAnswer:\n");
            prompt.push_str(&exemplar.output);
            prompt.push_str("\n\n");
        }
        prompt.push_str("### Task\n");
        prompt.push_str(&self.final_turn());
        prompt.push_str("\n\nAnswer:\n");
        prompt
    }
}
