//! Configuration file parsing for the server.
//!
//! Loads settings from TOML files: bind address, upload staging, and the
//! `[ingest]`, `[structurer]` and `[llm]` sections. The model credential is
//! never read from the file, only from the environment.

use docsift_ingest::IngestConfig;
use docsift_llm::GeminiSettings;
use docsift_structurer::StructurerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable holding the model provider credential
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Required credential missing from the environment
    #[error("Missing required environment variable: {0}")]
    MissingCredential(String),

    /// A value is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    pub bind_address: String,

    /// Bind port (e.g., 3000)
    pub bind_port: u16,

    /// Directory where uploads are staged during a request
    pub upload_dir: PathBuf,

    /// Maximum accepted request body size in bytes
    pub max_upload_bytes: usize,

    /// Extractor settings
    pub ingest: IngestConfig,

    /// Structuring settings
    pub structurer: StructurerConfig,

    /// Model provider settings
    pub llm: GeminiSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 3000,
            upload_dir: PathBuf::from("uploads"),
            max_upload_bytes: 25 * 1024 * 1024,
            ingest: IngestConfig::default(),
            structurer: StructurerConfig::default(),
            llm: GeminiSettings::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: ServerConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bind_address.trim().is_empty() {
            return Err(ConfigError::Invalid("bind_address must not be empty".to_string()));
        }
        if self.max_upload_bytes == 0 {
            return Err(ConfigError::Invalid(
                "max_upload_bytes must be greater than 0".to_string(),
            ));
        }
        self.ingest
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("[ingest] {}", e)))?;
        self.structurer
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("[structurer] {}", e)))?;
        self.llm
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("[llm] {}", e)))?;
        Ok(())
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}

/// Read the model credential from the environment
pub fn api_key_from_env() -> Result<String, ConfigError> {
    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(ConfigError::MissingCredential(API_KEY_ENV.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsift_structurer::OversizePolicy;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.llm.model, "gemini-1.5-flash");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
bind_address = "0.0.0.0"
bind_port = 8080

[structurer]
oversize_policy = "reject"

[llm]
model = "gemini-1.5-pro"

[llm.generation]
temperature = 0.2
"#
        )
        .unwrap();

        let config = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.structurer.oversize_policy, OversizePolicy::Reject);
        assert_eq!(config.llm.model, "gemini-1.5-pro");
        assert_eq!(config.llm.generation.temperature, 0.2);
        assert_eq!(config.llm.generation.top_k, 40);
        assert_eq!(config.ingest.ocr_language, "eng");
    }

    #[test]
    fn test_invalid_section_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[structurer]\nmax_input_chars = 0").unwrap();

        let result = ServerConfig::from_file(file.path());
        assert!(matches!(result, Err(ConfigError::Invalid(msg)) if msg.starts_with("[structurer]")));
    }

    #[test]
    fn test_missing_file() {
        let result = ServerConfig::from_file("/nonexistent/docsift.toml");
        assert!(matches!(result, Err(ConfigError::FileRead(_))));
    }
}
