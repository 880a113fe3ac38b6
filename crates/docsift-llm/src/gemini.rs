//! Gemini Provider Implementation
//!
//! Talks to the Generative Language API `generateContent` endpoint.
//!
//! # Features
//!
//! - Exemplars sent as prior user/model turns of the conversation
//! - JSON response mode via `responseMimeType`
//! - Retry with exponential backoff and jitter for transient failures
//! - Per-attempt timeout handling
//!
//! # Examples
//!
//! ```no_run
//! use docsift_llm::{GeminiProvider, GeminiSettings};
//!
//! let provider = GeminiProvider::new("api-key", GeminiSettings::default()).unwrap();
//! ```

use crate::config::{GeminiSettings, GenerationConfig};
use crate::retry::RetryPolicy;
use crate::{LlmError, LlmProvider};
use async_trait::async_trait;
use docsift_domain::PromptPayload;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Longest provider error body kept in an error message
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Generative Language API provider
pub struct GeminiProvider {
    api_key: String,
    endpoint: String,
    model: String,
    generation: GenerationConfig,
    client: reqwest::Client,
    retry: RetryPolicy,
}

/// Request body for the generateContent API
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content>,
    generation_config: WireGenerationConfig<'a>,
}

#[derive(Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig<'a> {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
    response_mime_type: &'a str,
}

/// Response from the generateContent API
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GeminiProvider {
    /// Create a new Gemini provider
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Config`] if the key is empty, the settings are
    /// invalid, or the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>, settings: GeminiSettings) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LlmError::Config("API key must not be empty".to_string()));
        }
        settings.validate().map_err(LlmError::Config)?;

        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout())
            .build()
            .map_err(|e| LlmError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let retry = RetryPolicy::new(
            settings.max_retries,
            Duration::from_millis(settings.retry_base_delay_ms),
            Duration::from_millis(settings.retry_max_jitter_ms),
        );

        Ok(Self {
            api_key,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            model: settings.model,
            generation: settings.generation,
            client,
            retry,
        })
    }

    /// Replace the retry policy
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn url(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.endpoint, self.model)
    }

    /// Build the request body: one user/model exchange per exemplar, then the task
    fn request_body<'a>(&'a self, payload: &PromptPayload) -> GenerateContentRequest<'a> {
        let mut contents = Vec::with_capacity(payload.exemplars.len() * 2 + 1);
        for exemplar in &payload.exemplars {
            contents.push(Content {
                role: "user",
                parts: vec![Part {
                    text: PromptPayload::user_turn(&payload.instruction, &exemplar.input),
                }],
            });
            contents.push(Content {
                role: "model",
                parts: vec![Part {
                    text: exemplar.output.clone(),
                }],
            });
        }
        contents.push(Content {
            role: "user",
            parts: vec![Part {
                text: payload.final_turn(),
            }],
        });

        GenerateContentRequest {
            contents,
            generation_config: WireGenerationConfig {
                temperature: self.generation.temperature,
                top_p: self.generation.top_p,
                top_k: self.generation.top_k,
                max_output_tokens: self.generation.max_output_tokens,
                response_mime_type: &self.generation.response_mime_type,
            },
        }
    }

    /// One HTTP attempt
    async fn attempt(&self, body: &GenerateContentRequest<'_>) -> Result<String, LlmError> {
        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout(e.to_string())
                } else {
                    LlmError::Communication(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::Communication(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(classify_status(status.as_u16(), &text, &self.model));
        }

        parse_response(&text)
    }
}

impl fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("generation", &self.generation)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    async fn generate(&self, payload: &PromptPayload) -> Result<String, LlmError> {
        let body = self.request_body(payload);
        debug!(
            "Sending {} turns to {} ({} chars of document text)",
            body.contents.len(),
            self.model,
            payload.document_text.len()
        );

        self.retry.run(|_| self.attempt(&body)).await
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Map a non-success HTTP status to an error
fn classify_status(status: u16, body: &str, model: &str) -> LlmError {
    let body: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
    match status {
        429 => LlmError::RateLimitExceeded,
        404 => LlmError::ModelNotAvailable(model.to_string()),
        500..=599 => LlmError::Server { status, body },
        _ => LlmError::Rejected { status, body },
    }
}

/// Pull the reply text out of a generateContent response
fn parse_response(text: &str) -> Result<String, LlmError> {
    let response: GenerateContentResponse = serde_json::from_str(text)
        .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "no candidates".to_string());
        return Err(LlmError::EmptyResponse(reason));
    };

    let reply: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if reply.trim().is_empty() {
        return Err(LlmError::EmptyResponse(
            candidate
                .finish_reason
                .unwrap_or_else(|| "empty candidate".to_string()),
        ));
    }

    Ok(reply)
}
