//! Configuration for model providers

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Generative Language API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Default model
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Default timeout for a single HTTP attempt (60 seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Default number of attempts, including the first
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default base delay before the first retry
pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 500;

/// Default upper bound on random jitter added to each retry delay
pub const DEFAULT_RETRY_MAX_JITTER_MS: u64 = 250;

/// Sampling and output parameters sent with every structuring request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Sampling temperature
    pub temperature: f32,

    /// Nucleus sampling probability cutoff
    pub top_p: f32,

    /// Top-k sampling cutoff
    pub top_k: u32,

    /// Maximum number of tokens in the reply
    pub max_output_tokens: u32,

    /// MIME type the provider must emit
    pub response_mime_type: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            top_p: 0.95,
            top_k: 40,
            max_output_tokens: 8192,
            response_mime_type: "application/json".to_string(),
        }
    }
}

impl GenerationConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err("temperature must be between 0.0 and 2.0".to_string());
        }
        if !(0.0..=1.0).contains(&self.top_p) {
            return Err("top_p must be between 0.0 and 1.0".to_string());
        }
        if self.top_k == 0 {
            return Err("top_k must be greater than 0".to_string());
        }
        if self.max_output_tokens == 0 {
            return Err("max_output_tokens must be greater than 0".to_string());
        }
        if self.response_mime_type.trim().is_empty() {
            return Err("response_mime_type must not be empty".to_string());
        }
        Ok(())
    }
}

/// Connection settings for [`crate::GeminiProvider`]
///
/// The API key is deliberately absent: it is only ever read from the
/// environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiSettings {
    /// API base URL
    pub endpoint: String,

    /// Model identifier
    pub model: String,

    /// Timeout for one HTTP attempt (seconds)
    pub request_timeout_secs: u64,

    /// Maximum attempts for transient failures, including the first
    pub max_retries: u32,

    /// Base delay before the first retry (milliseconds), doubled per attempt
    pub retry_base_delay_ms: u64,

    /// Upper bound on random jitter added to each delay (milliseconds)
    pub retry_max_jitter_ms: u64,

    /// Generation parameters
    pub generation: GenerationConfig,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_base_delay_ms: DEFAULT_RETRY_BASE_DELAY_MS,
            retry_max_jitter_ms: DEFAULT_RETRY_MAX_JITTER_MS,
            generation: GenerationConfig::default(),
        }
    }
}

impl GeminiSettings {
    /// Get the per-attempt timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.trim().is_empty() {
            return Err("endpoint must not be empty".to_string());
        }
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than 0".to_string());
        }
        if self.max_retries == 0 {
            return Err("max_retries must be at least 1".to_string());
        }
        self.generation.validate()
    }
}
