//! Request pipeline shared by both document endpoints
//!
//! ```text
//! multipart → receive (extension check, stage) → extract → discard
//!                                                   ├→ raw text
//!                                                   └→ structurer → record
//! ```

use crate::error::ApiError;
use crate::upload::{StagedUpload, UploadError, UploadStore};
use axum::extract::Multipart;
use docsift_domain::format::extension_of;
use docsift_domain::{ExtractedText, StructuredRecord};
use docsift_ingest::Dispatcher;
use docsift_structurer::Structurer;
use tracing::info;

/// Name of the multipart part holding the document
pub const FILE_FIELD: &str = "file";

/// Dispatcher, structurer and upload staging for one server
pub struct Pipeline {
    dispatcher: Dispatcher,
    structurer: Structurer,
    uploads: UploadStore,
}

impl Pipeline {
    /// Assemble a pipeline
    pub fn new(dispatcher: Dispatcher, structurer: Structurer, uploads: UploadStore) -> Self {
        Self {
            dispatcher,
            structurer,
            uploads,
        }
    }

    /// Name of the model used for structuring
    pub fn model_name(&self) -> &str {
        self.structurer.model_name()
    }

    /// Find the `file` part, check its extension, and stage it
    ///
    /// An unsupported extension is refused before anything is written.
    pub async fn receive(&self, multipart: &mut Multipart) -> Result<StagedUpload, ApiError> {
        while let Some(field) = multipart.next_field().await.map_err(UploadError::from)? {
            if field.name() != Some(FILE_FIELD) {
                continue;
            }
            let declared_name = match field.file_name() {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => continue,
            };

            self.dispatcher
                .dispatch(&extension_of(&declared_name))
                .map_err(ApiError::UnsupportedFormat)?;

            return Ok(self.uploads.stage(field, &declared_name).await?);
        }

        Err(ApiError::NoFile)
    }

    /// Receive, extract, and always discard the staged file
    pub async fn ingest(&self, multipart: &mut Multipart) -> Result<ExtractedText, ApiError> {
        let staged = self.receive(multipart).await?;
        let result = self.dispatcher.extract(staged.document()).await;
        staged.discard().await;
        Ok(result?)
    }

    /// Raw-text mode: the extracted text as-is
    pub async fn raw_text(&self, multipart: &mut Multipart) -> Result<ExtractedText, ApiError> {
        let text = self.ingest(multipart).await?;
        info!("Returning {} chars of raw text", text.len());
        Ok(text)
    }

    /// Structured mode: extracted text run through the structurer
    pub async fn structured(&self, multipart: &mut Multipart) -> Result<StructuredRecord, ApiError> {
        let text = self.ingest(multipart).await?;
        let record = self.structurer.structure_text(&text).await?;
        info!("Returning record with {} entries", record.len());
        Ok(record)
    }
}
