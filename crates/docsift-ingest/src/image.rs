//! Image OCR using the Tesseract command-line program
//!
//! The child process is awaited asynchronously and killed if the caller's
//! timeout drops the future, so slow OCR never blocks other requests.

use crate::{ExtractionError, TextExtractor};
use async_trait::async_trait;
use docsift_domain::{DocumentFormat, ExtractedText};
use std::path::Path;
use std::time::Instant;
use tokio::process::Command;
use tracing::debug;

/// Whole-image OCR with a fixed language
#[derive(Debug, Clone)]
pub struct ImageExtractor {
    binary: String,
    language: String,
}

impl ImageExtractor {
    /// Create a new image extractor
    pub fn new(binary: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            language: language.into(),
        }
    }

    /// Tesseract language code in use
    pub fn language(&self) -> &str {
        &self.language
    }
}

impl Default for ImageExtractor {
    fn default() -> Self {
        Self::new("tesseract", "eng")
    }
}

#[async_trait]
impl TextExtractor for ImageExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Image
    }

    async fn extract(&self, path: &Path) -> Result<ExtractedText, ExtractionError> {
        let start = Instant::now();
        let output = Command::new(&self.binary)
            .arg(path)
            .arg("stdout")
            .args(["-l", self.language.as_str()])
            .kill_on_drop(true)
            .output()
            .await;

        match output {
            Ok(output) if output.status.success() => {
                let text = String::from_utf8_lossy(&output.stdout).into_owned();
                debug!(
                    "OCR recognized {} chars in {}ms",
                    text.len(),
                    start.elapsed().as_millis()
                );
                Ok(text)
            }
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(ExtractionError::Ocr(format!(
                    "{} exited with {}: {}",
                    self.binary,
                    output.status,
                    stderr.trim()
                )))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ExtractionError::BackendUnavailable(format!(
                    "{} not found (install tesseract-ocr)",
                    self.binary
                )))
            }
            Err(e) => Err(ExtractionError::Io(e)),
        }
    }
}
