//! HTTP error mapping

use crate::upload::UploadError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use docsift_domain::UnsupportedFormatError;
use docsift_ingest::{ExtractionError, IngestError};
use docsift_structurer::StructurerError;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Client-facing message
    pub message: String,

    /// Underlying error, for server faults
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Application error type
#[derive(Debug)]
pub enum ApiError {
    /// The request carried no `file` part
    NoFile,
    /// The multipart body could not be read
    BadRequest {
        /// 400, or 413 when the body limit was hit
        status: StatusCode,
        /// Client-facing message
        message: String,
    },
    /// The declared extension has no extractor
    UnsupportedFormat(UnsupportedFormatError),
    /// The extractor failed on the staged file
    Extraction(ExtractionError),
    /// The structuring step failed
    Processing(StructurerError),
    /// Any other server-side fault
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, detail) = match self {
            ApiError::NoFile => {
                warn!("Rejected request without a file");
                (StatusCode::BAD_REQUEST, "No file uploaded".to_string(), None)
            }
            ApiError::BadRequest { status, message } => {
                warn!("Rejected malformed upload ({}): {}", status, message);
                (status, message, None)
            }
            ApiError::UnsupportedFormat(e) => {
                warn!("{}", e);
                (StatusCode::BAD_REQUEST, "Unsupported file type".to_string(), None)
            }
            ApiError::Extraction(e) => {
                error!("Extraction failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server error".to_string(),
                    Some(e.to_string()),
                )
            }
            ApiError::Processing(e) => {
                error!("Document processing failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to process document".to_string(),
                    None,
                )
            }
            ApiError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server error".to_string(),
                    Some(msg),
                )
            }
        };

        let body = Json(ErrorResponse {
            message,
            error: detail,
        });
        (status, body).into_response()
    }
}

impl From<UploadError> for ApiError {
    fn from(e: UploadError) -> Self {
        match e {
            UploadError::Multipart(e) => ApiError::BadRequest {
                status: e.status(),
                message: e.body_text(),
            },
            UploadError::Io(e) => ApiError::Internal(format!("Failed to stage upload: {}", e)),
        }
    }
}

impl From<IngestError> for ApiError {
    fn from(e: IngestError) -> Self {
        match e {
            IngestError::Unsupported(e) => ApiError::UnsupportedFormat(e),
            IngestError::Extraction(e) => ApiError::Extraction(e),
        }
    }
}

impl From<StructurerError> for ApiError {
    fn from(e: StructurerError) -> Self {
        ApiError::Processing(e)
    }
}
