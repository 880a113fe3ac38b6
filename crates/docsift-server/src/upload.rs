//! Upload staging: write a multipart file field to the uploads directory
//!
//! Every staged file is named `<uuid>.<ext>` and removed once the request is
//! done with it, either through [`StagedUpload::discard`] or, on an early
//! return or cancellation, when the guard is dropped.

use axum::extract::multipart::{Field, MultipartError};
use docsift_domain::{DocumentId, UploadedDocument};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// Failure while staging an upload
#[derive(Debug, Error)]
pub enum UploadError {
    /// The multipart stream was malformed or cut off
    #[error("Invalid multipart body: {0}")]
    Multipart(#[from] MultipartError),

    /// Writing the staged file failed
    #[error("Failed to stage upload: {0}")]
    Io(#[from] io::Error),
}

/// The uploads directory
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    /// Open the uploads directory, creating it if absent
    pub async fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    /// The uploads directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Stream a file field to disk under a fresh id
    ///
    /// A partially written file is removed before the error is returned.
    pub async fn stage(
        &self,
        mut field: Field<'_>,
        declared_name: &str,
    ) -> Result<StagedUpload, UploadError> {
        let id = DocumentId::new();
        let path = self
            .dir
            .join(UploadedDocument::staged_file_name(id, declared_name));
        let staged = StagedUpload::new(UploadedDocument::new(id, path, declared_name));

        let mut file = File::create(staged.path()).await?;
        let mut written = 0usize;
        while let Some(chunk) = field.chunk().await? {
            file.write_all(&chunk).await?;
            written += chunk.len();
        }
        file.flush().await?;

        debug!("Staged {} bytes for '{}' as {}", written, declared_name, id);
        Ok(staged)
    }
}

/// A staged upload that is deleted when the request is done with it
#[derive(Debug)]
pub struct StagedUpload {
    document: UploadedDocument,
    discarded: bool,
}

impl StagedUpload {
    fn new(document: UploadedDocument) -> Self {
        Self {
            document,
            discarded: false,
        }
    }

    /// The staged document
    pub fn document(&self) -> &UploadedDocument {
        &self.document
    }

    /// Location of the staged bytes
    pub fn path(&self) -> &Path {
        &self.document.path
    }

    /// Delete the staged file
    pub async fn discard(mut self) {
        self.discarded = true;
        match tokio::fs::remove_file(&self.document.path).await {
            Ok(()) => debug!("Removed staged upload {}", self.document.id),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                "Failed to remove staged upload {}: {}",
                self.document.path.display(),
                e
            ),
        }
    }
}

impl Drop for StagedUpload {
    fn drop(&mut self) {
        if self.discarded {
            return;
        }
        match std::fs::remove_file(&self.document.path) {
            Ok(()) => debug!("Removed staged upload {} on drop", self.document.id),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                "Failed to remove staged upload {}: {}",
                self.document.path.display(),
                e
            ),
        }
    }
}
