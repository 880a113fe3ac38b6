//! Configuration for the extractors

use docsift_domain::DocumentFormat;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Extractor timeouts and OCR settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Maximum time to extract a PDF (seconds)
    pub pdf_timeout_secs: u64,

    /// Maximum time to extract a workbook (seconds)
    pub spreadsheet_timeout_secs: u64,

    /// Maximum time for OCR of one image (seconds)
    pub ocr_timeout_secs: u64,

    /// Tesseract language code
    pub ocr_language: String,

    /// Tesseract executable name or path
    pub tesseract_binary: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            pdf_timeout_secs: 60,
            spreadsheet_timeout_secs: 60,
            ocr_timeout_secs: 120,
            ocr_language: "eng".to_string(),
            tesseract_binary: "tesseract".to_string(),
        }
    }
}

impl IngestConfig {
    /// Timeout in seconds for one format
    pub fn timeout_secs(&self, format: DocumentFormat) -> u64 {
        match format {
            DocumentFormat::Pdf => self.pdf_timeout_secs,
            DocumentFormat::Spreadsheet => self.spreadsheet_timeout_secs,
            DocumentFormat::Image => self.ocr_timeout_secs,
        }
    }

    /// Timeout for one format as a Duration
    pub fn timeout(&self, format: DocumentFormat) -> Duration {
        Duration::from_secs(self.timeout_secs(format))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.pdf_timeout_secs == 0 || self.spreadsheet_timeout_secs == 0 || self.ocr_timeout_secs == 0 {
            return Err("extraction timeouts must be greater than 0".to_string());
        }
        if self.ocr_language.trim().is_empty() {
            return Err("ocr_language must not be empty".to_string());
        }
        if self.tesseract_binary.trim().is_empty() {
            return Err("tesseract_binary must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = IngestConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.ocr_language, "eng");
    }

    #[test]
    fn test_timeout_per_format() {
        let config = IngestConfig::default();
        assert_eq!(config.timeout(DocumentFormat::Pdf), Duration::from_secs(60));
        assert_eq!(config.timeout(DocumentFormat::Image), Duration::from_secs(120));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = IngestConfig::default();
        config.ocr_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml() {
        let config: IngestConfig = toml::from_str("ocr_language = \"deu\"").unwrap();
        assert_eq!(config.ocr_language, "deu");
        assert_eq!(config.pdf_timeout_secs, 60);
    }
}
