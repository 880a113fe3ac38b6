//! Docsift LLM Provider Layer
//!
//! Pluggable model providers used by the structuring engine.
//!
//! # Architecture
//!
//! Providers implement [`LlmProvider`], which receives a full
//! [`PromptPayload`] so multi-turn backends can present exemplars as a
//! conversation while single-prompt backends call [`PromptPayload::render`].
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `GeminiProvider`: Google Generative Language API with JSON responses
//!
//! # Examples
//!
//! ```
//! use docsift_llm::{LlmProvider, MockProvider};
//! use docsift_domain::PromptPayload;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let provider = MockProvider::new(r#"{"ok": true}"#);
//! let payload = PromptPayload {
//!     instruction: "Extract".to_string(),
//!     exemplars: vec![],
//!     document_text: "text".to_string(),
//! };
//! let reply = provider.generate(&payload).await.unwrap();
//! assert_eq!(reply, r#"{"ok": true}"#);
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod gemini;
pub mod retry;

use async_trait::async_trait;
use docsift_domain::PromptPayload;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

pub use config::{GeminiSettings, GenerationConfig};
pub use gemini::GeminiProvider;
pub use retry::RetryPolicy;

/// Errors that can occur during LLM operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// The request did not complete within the client timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Provider-side failure (HTTP 5xx)
    #[error("Provider error (HTTP {status}): {body}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Response body, possibly truncated
        body: String,
    },

    /// Request refused by the provider (HTTP 4xx other than 404/429)
    #[error("Request rejected (HTTP {status}): {body}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Response body, possibly truncated
        body: String,
    },

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Invalid response envelope from the provider
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The provider answered without any text (blocked or empty candidate)
    #[error("Empty response: {0}")]
    EmptyResponse(String),

    /// Invalid provider configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

impl LlmError {
    /// Whether retrying the same request may succeed
    ///
    /// Connection failures, timeouts, rate limiting and 5xx responses are
    /// transient. Everything else is a permanent failure of this request.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            LlmError::Communication(_)
                | LlmError::Timeout(_)
                | LlmError::RateLimitExceeded
                | LlmError::Server { .. }
        )
    }
}

/// A text-completion service that answers a [`PromptPayload`]
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send the payload and return the model's raw text reply
    async fn generate(&self, payload: &PromptPayload) -> Result<String, LlmError>;

    /// Name of the model answering requests, for logs and health output
    fn model_name(&self) -> &str;
}

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured replies without making any network calls. Replies
/// can be keyed by the payload's document text.
///
/// # Examples
///
/// ```
/// use docsift_llm::MockProvider;
///
/// let mut provider = MockProvider::default();
/// provider.add_response("invoice one", r#"{"A": {}}"#);
/// provider.add_error("broken invoice");
/// assert_eq!(provider.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, Result<String, LlmError>>>>,
    call_count: Arc<Mutex<usize>>,
    last_payload: Arc<Mutex<Option<PromptPayload>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all payloads
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
            last_payload: Arc::new(Mutex::new(None)),
        }
    }

    /// Add a specific response for a given document text
    pub fn add_response(&mut self, document_text: impl Into<String>, response: impl Into<String>) {
        lock(&self.responses).insert(document_text.into(), Ok(response.into()));
    }

    /// Configure to return an error for a specific document text
    pub fn add_error(&mut self, document_text: impl Into<String>) {
        self.add_failure(document_text, LlmError::Other("Mock error".to_string()));
    }

    /// Configure to return a particular error for a specific document text
    pub fn add_failure(&mut self, document_text: impl Into<String>, error: LlmError) {
        lock(&self.responses).insert(document_text.into(), Err(error));
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        *lock(&self.call_count)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *lock(&self.call_count) = 0;
    }

    /// The most recent payload passed to generate
    pub fn last_payload(&self) -> Option<PromptPayload> {
        lock(&self.last_payload).clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("{}")
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    async fn generate(&self, payload: &PromptPayload) -> Result<String, LlmError> {
        *lock(&self.call_count) += 1;
        *lock(&self.last_payload) = Some(payload.clone());

        if let Some(reply) = lock(&self.responses).get(&payload.document_text) {
            return reply.clone();
        }

        Ok(self.default_response.clone())
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
