//! Docsift Server
//!
//! HTTP front end: accepts an uploaded PDF, workbook or image, extracts its
//! text, and returns either the raw text (`/read-pdf`) or a structured
//! record produced by the model (`/process-document`).

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod pipeline;
pub mod upload;

use config::ServerConfig;
use docsift_ingest::Dispatcher;
use docsift_llm::{GeminiProvider, LlmError, LlmProvider};
use docsift_structurer::Structurer;
use handlers::{create_router, AppState};
use pipeline::Pipeline;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use upload::UploadStore;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Model provider could not be set up
    #[error("Model provider error: {0}")]
    Llm(#[from] LlmError),

    /// Binding or upload directory error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Install the global tracing subscriber
///
/// Honors `RUST_LOG`, defaulting to `info`. Calling it twice is harmless.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Build the shared state for a configuration and model provider
///
/// Creates the uploads directory if it does not exist.
pub async fn build_state(
    config: &ServerConfig,
    provider: Arc<dyn LlmProvider>,
) -> Result<AppState, ServerError> {
    let uploads = UploadStore::open(&config.upload_dir).await?;
    let dispatcher = Dispatcher::new(config.ingest.clone());
    let structurer = Structurer::new(provider, config.structurer.clone());

    Ok(AppState {
        pipeline: Arc::new(Pipeline::new(dispatcher, structurer, uploads)),
    })
}

/// Start the HTTP server
///
/// Builds the Gemini provider from `api_key`, stages uploads under the
/// configured directory, and serves until the process is stopped.
pub async fn start_server(config: ServerConfig, api_key: String) -> Result<(), ServerError> {
    config.validate()?;

    info!("Starting Docsift server");
    info!("Model: {}", config.llm.model);
    info!("Upload directory: {}", config.upload_dir.display());
    info!("Max upload size: {} bytes", config.max_upload_bytes);

    let provider = GeminiProvider::new(api_key, config.llm.clone())?;
    let state = build_state(&config, Arc::new(provider)).await?;
    let app = create_router(state, config.max_upload_bytes);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsift_llm::MockProvider;

    #[tokio::test]
    async fn test_build_state_creates_upload_dir() {
        let root = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            upload_dir: root.path().join("uploads"),
            ..ServerConfig::default()
        };

        let state = build_state(&config, Arc::new(MockProvider::default()))
            .await
            .unwrap();
        assert!(config.upload_dir.is_dir());
        assert_eq!(state.pipeline.model_name(), "mock");
    }

    #[tokio::test]
    async fn test_start_server_requires_api_key() {
        let root = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            upload_dir: root.path().join("uploads"),
            ..ServerConfig::default()
        };

        let result = start_server(config, "  ".to_string()).await;
        assert!(matches!(result, Err(ServerError::Llm(LlmError::Config(_)))));
    }
}
