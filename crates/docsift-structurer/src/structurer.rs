//! Core Structurer implementation

use crate::config::{OversizePolicy, StructurerConfig};
use crate::error::StructurerError;
use crate::parser::parse_llm_response;
use crate::prompt::{truncate_chars, PromptBuilder};
use crate::schema::validate_record;
use docsift_domain::{PromptPayload, StructuredRecord};
use docsift_llm::LlmProvider;
use serde_json::Value;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// The Structurer turns extracted document text into a structured record
pub struct Structurer {
    llm_provider: Arc<dyn LlmProvider>,
    config: StructurerConfig,
}

impl Structurer {
    /// Create a new Structurer over a shared provider
    pub fn new(llm_provider: Arc<dyn LlmProvider>, config: StructurerConfig) -> Self {
        Self {
            llm_provider,
            config,
        }
    }

    /// Create a new Structurer that owns its provider
    pub fn from_provider<L>(llm_provider: L, config: StructurerConfig) -> Self
    where
        L: LlmProvider + 'static,
    {
        Self::new(Arc::new(llm_provider), config)
    }

    /// Name of the model behind this structurer
    pub fn model_name(&self) -> &str {
        self.llm_provider.model_name()
    }

    /// Borrow the configuration
    pub fn config(&self) -> &StructurerConfig {
        &self.config
    }

    /// Apply the size policy and build the prompt payload
    pub fn prepare(&self, text: &str) -> Result<PromptPayload, StructurerError> {
        let max = self.config.max_input_chars;
        let len = text.chars().count();

        if len <= max {
            return Ok(PromptBuilder::new(text).build());
        }

        match self.config.oversize_policy {
            OversizePolicy::Reject => Err(StructurerError::InputTooLong { len, max }),
            OversizePolicy::Truncate => {
                warn!("Document text has {} chars, truncating to {}", len, max);
                Ok(PromptBuilder::new(truncate_chars(text, max)).build())
            }
        }
    }

    /// Structure extracted text: size policy, prompt, model call, validation
    pub async fn structure_text(&self, text: &str) -> Result<StructuredRecord, StructurerError> {
        let payload = self.prepare(text)?;
        self.structure(&payload).await
    }

    /// Send a built payload to the model and validate the reply
    pub async fn structure(&self, payload: &PromptPayload) -> Result<StructuredRecord, StructurerError> {
        info!(
            "Structuring {} chars with {}",
            payload.document_text.len(),
            self.llm_provider.model_name()
        );

        let response = timeout(
            self.config.model_timeout(),
            self.llm_provider.generate(payload),
        )
        .await
        .map_err(|_| StructurerError::Timeout(self.config.model_timeout_secs))??;

        debug!("Model replied with {} chars", response.len());

        let value = parse_llm_response(&response)?;

        let record = if self.config.enforce_schema {
            validate_record(value)?
        } else {
            match value {
                Value::Object(map) => StructuredRecord::from_map(map),
                _ => return Err(StructurerError::Parse("Expected JSON object".to_string())),
            }
        };

        info!(
            "Structured record with {} parties and {} summary values",
            record.parties().count(),
            record.summary().count()
        );

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsift_llm::MockProvider;

    #[test]
    fn test_prepare_within_limit_keeps_text() {
        let structurer = Structurer::from_provider(MockProvider::default(), StructurerConfig::default());
        let payload = structurer.prepare("Invoice 7").unwrap();
        assert_eq!(payload.document_text, "Invoice 7");
    }

    #[test]
    fn test_prepare_truncates_by_default() {
        let config = StructurerConfig {
            max_input_chars: 5,
            ..StructurerConfig::default()
        };
        let structurer = Structurer::from_provider(MockProvider::default(), config);
        let payload = structurer.prepare("abcdefghij").unwrap();
        assert_eq!(payload.document_text, "abcde");
    }

    #[test]
    fn test_prepare_rejects_when_strict() {
        let config = StructurerConfig {
            max_input_chars: 5,
            ..StructurerConfig::strict()
        };
        let structurer = Structurer::from_provider(MockProvider::default(), config);
        let result = structurer.prepare("abcdefghij");
        assert!(matches!(
            result,
            Err(StructurerError::InputTooLong { len: 10, max: 5 })
        ));
    }

    #[test]
    fn test_model_name_comes_from_provider() {
        let structurer = Structurer::from_provider(MockProvider::default(), StructurerConfig::default());
        assert_eq!(structurer.model_name(), "mock");
    }
}
