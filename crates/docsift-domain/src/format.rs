//! Format module - maps declared file extensions to document families

use std::fmt;
use thiserror::Error;

/// Every extension the service accepts, lowercase and without the dot
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "xlsx", "xls", "png", "jpg", "jpeg"];

/// Raised when an upload's extension has no matching extractor
///
/// This is a client input error: it is never retried and never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported file type: '{extension}'")]
pub struct UnsupportedFormatError {
    /// The extension as declared by the client (normalized, may be empty)
    pub extension: String,
}

/// Family of an uploaded document
///
/// Each family has exactly one extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    /// Portable Document Format (`.pdf`)
    Pdf,

    /// Excel workbooks (`.xlsx`, `.xls`)
    Spreadsheet,

    /// Raster images handled by OCR (`.png`, `.jpg`, `.jpeg`)
    Image,
}

impl DocumentFormat {
    /// Resolve a format from a file extension
    ///
    /// Matching is case-insensitive and a leading dot is optional.
    ///
    /// # Examples
    ///
    /// ```
    /// use docsift_domain::DocumentFormat;
    ///
    /// assert_eq!(DocumentFormat::from_extension(".PDF").unwrap(), DocumentFormat::Pdf);
    /// assert_eq!(DocumentFormat::from_extension("xls").unwrap(), DocumentFormat::Spreadsheet);
    /// assert!(DocumentFormat::from_extension(".docx").is_err());
    /// ```
    pub fn from_extension(extension: &str) -> Result<Self, UnsupportedFormatError> {
        let normalized = normalize_extension(extension);
        match normalized.as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "xlsx" | "xls" => Ok(DocumentFormat::Spreadsheet),
            "png" | "jpg" | "jpeg" => Ok(DocumentFormat::Image),
            _ => Err(UnsupportedFormatError {
                extension: normalized,
            }),
        }
    }

    /// Resolve a format from a file name's final extension
    pub fn from_file_name(name: &str) -> Result<Self, UnsupportedFormatError> {
        Self::from_extension(&extension_of(name))
    }

    /// Get the format name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Spreadsheet => "spreadsheet",
            DocumentFormat::Image => "image",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercase an extension and strip any leading dots
pub fn normalize_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_ascii_lowercase()
}

/// Extract the normalized extension of a file name
///
/// Returns an empty string when the name has no extension. Hidden files such
/// as `.env` are treated as having none.
pub fn extension_of(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    match base.rfind('.') {
        Some(0) | None => String::new(),
        Some(idx) => normalize_extension(&base[idx + 1..]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_supported_extension_resolves() {
        for ext in SUPPORTED_EXTENSIONS {
            assert!(DocumentFormat::from_extension(ext).is_ok(), "{} should resolve", ext);
            let dotted = format!(".{}", ext.to_uppercase());
            assert!(DocumentFormat::from_extension(&dotted).is_ok(), "{} should resolve", dotted);
        }
    }

    #[test]
    fn test_format_families() {
        assert_eq!(DocumentFormat::from_extension("pdf").unwrap(), DocumentFormat::Pdf);
        assert_eq!(DocumentFormat::from_extension("xlsx").unwrap(), DocumentFormat::Spreadsheet);
        assert_eq!(DocumentFormat::from_extension("xls").unwrap(), DocumentFormat::Spreadsheet);
        assert_eq!(DocumentFormat::from_extension("png").unwrap(), DocumentFormat::Image);
        assert_eq!(DocumentFormat::from_extension("JPG").unwrap(), DocumentFormat::Image);
        assert_eq!(DocumentFormat::from_extension(".jpeg").unwrap(), DocumentFormat::Image);
    }

    #[test]
    fn test_unsupported_extensions() {
        for ext in ["docx", ".csv", "txt", "", "pdfx", "tiff"] {
            let err = DocumentFormat::from_extension(ext).unwrap_err();
            assert_eq!(err.extension, normalize_extension(ext));
        }
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("invoice.PDF"), "pdf");
        assert_eq!(extension_of("archive.tar.gz"), "gz");
        assert_eq!(extension_of("dir.v2/report"), "");
        assert_eq!(extension_of("C:\\scans\\page.Jpeg"), "jpeg");
        assert_eq!(extension_of(".env"), "");
        assert_eq!(extension_of("noext"), "");
    }

    #[test]
    fn test_from_file_name() {
        assert_eq!(
            DocumentFormat::from_file_name("Sales Register.xlsx").unwrap(),
            DocumentFormat::Spreadsheet
        );
        assert!(DocumentFormat::from_file_name("letter.docx").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(DocumentFormat::Pdf.to_string(), "pdf");
        assert_eq!(DocumentFormat::Spreadsheet.to_string(), "spreadsheet");
        assert_eq!(DocumentFormat::Image.to_string(), "image");
    }
}
