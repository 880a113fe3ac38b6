//! Configuration for the Structurer

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What to do with document text longer than `max_input_chars`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OversizePolicy {
    /// Keep the first `max_input_chars` characters and log a warning
    #[default]
    Truncate,
    /// Fail with `StructurerError::InputTooLong`
    Reject,
}

/// Configuration for the Structurer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructurerConfig {
    /// Maximum document text length (characters) sent to the model
    pub max_input_chars: usize,

    /// Handling of text over the limit
    pub oversize_policy: OversizePolicy,

    /// Maximum time for the whole model call, retries included (seconds)
    pub model_timeout_secs: u64,

    /// Reject replies that do not match the record schema
    pub enforce_schema: bool,
}

impl StructurerConfig {
    /// Get the model timeout as a Duration
    pub fn model_timeout(&self) -> Duration {
        Duration::from_secs(self.model_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_input_chars == 0 {
            return Err("max_input_chars must be greater than 0".to_string());
        }
        if self.model_timeout_secs == 0 {
            return Err("model_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for StructurerConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            max_input_chars: 60_000,
            oversize_policy: OversizePolicy::Truncate,
            model_timeout_secs: 120,
            enforce_schema: true,
        }
    }
}

impl StructurerConfig {
    /// Strict preset: oversized documents are refused instead of truncated
    pub fn strict() -> Self {
        Self {
            oversize_policy: OversizePolicy::Reject,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
