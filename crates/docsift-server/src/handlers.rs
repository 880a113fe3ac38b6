//! HTTP request handlers.
//!
//! Document upload endpoints and a health check using axum.

use crate::error::ApiError;
use crate::pipeline::Pipeline;
use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    response::Json,
    routing::{get, post},
    Router as AxumRouter,
};
use docsift_domain::StructuredRecord;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Extraction and structuring pipeline
    pub pipeline: Arc<Pipeline>,
}

/// Raw-text response
#[derive(Debug, Serialize, Deserialize)]
pub struct RawTextResponse {
    /// Extracted document text
    pub content: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Always "ok" while the process serves requests
    pub status: String,
    /// Model used for structuring
    pub model: String,
}

/// GET|POST /read-pdf - Extract and return raw text
async fn read_pdf(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<RawTextResponse>, ApiError> {
    let mut multipart = multipart.map_err(|_| ApiError::NoFile)?;
    let content = state.pipeline.raw_text(&mut multipart).await?;
    Ok(Json(RawTextResponse { content }))
}

/// POST /process-document - Extract and structure a document
async fn process_document(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<StructuredRecord>, ApiError> {
    let mut multipart = multipart.map_err(|_| ApiError::NoFile)?;
    let record = state.pipeline.structured(&mut multipart).await?;
    Ok(Json(record))
}

/// GET /health - Liveness check
async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "ok".to_string(),
        model: state.pipeline.model_name().to_string(),
    })
}

/// Create the axum router with all routes
pub fn create_router(state: AppState, max_upload_bytes: usize) -> AxumRouter {
    AxumRouter::new()
        .route("/read-pdf", get(read_pdf).post(read_pdf))
        .route("/process-document", post(process_document))
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
