//! Document module - a staged upload awaiting extraction

use crate::format::{extension_of, DocumentFormat, UnsupportedFormatError};
use std::fmt;
use std::path::{Path, PathBuf};

/// Unique identifier for a staged upload based on UUIDv7
///
/// Used as the on-disk file name so concurrent uploads of identically named
/// files never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(u128);

impl DocumentId {
    /// Generate a new UUIDv7-based DocumentId
    ///
    /// # Examples
    ///
    /// ```
    /// use docsift_domain::DocumentId;
    ///
    /// let a = DocumentId::new();
    /// let b = DocumentId::new();
    /// assert_ne!(a, b);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// An uploaded file staged on local disk
///
/// Owned exclusively by the request that received it. The staging layer is
/// responsible for deleting `path` once extraction has completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedDocument {
    /// Identifier, also the stem of the staged file name
    pub id: DocumentId,

    /// Location of the staged bytes
    pub path: PathBuf,

    /// File name as declared by the client
    pub declared_name: String,

    /// Normalized extension of `declared_name` (lowercase, no dot)
    pub extension: String,
}

impl UploadedDocument {
    /// Describe a staged upload
    pub fn new(id: DocumentId, path: impl Into<PathBuf>, declared_name: impl Into<String>) -> Self {
        let declared_name = declared_name.into();
        let extension = extension_of(&declared_name);
        Self {
            id,
            path: path.into(),
            declared_name,
            extension,
        }
    }

    /// Staged file name for an upload: `<id>.<ext>`, or just `<id>` without an extension
    pub fn staged_file_name(id: DocumentId, declared_name: &str) -> String {
        let extension = extension_of(declared_name);
        if extension.is_empty() {
            id.to_string()
        } else {
            format!("{}.{}", id, extension)
        }
    }

    /// Resolve the format from the declared extension
    pub fn format(&self) -> Result<DocumentFormat, UnsupportedFormatError> {
        DocumentFormat::from_extension(&self.extension)
    }

    /// Borrow the staged path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_derives_extension() {
        let doc = UploadedDocument::new(DocumentId::new(), "/tmp/x.pdf", "Invoice 12.PDF");
        assert_eq!(doc.extension, "pdf");
        assert_eq!(doc.declared_name, "Invoice 12.PDF");
        assert_eq!(doc.format().unwrap(), DocumentFormat::Pdf);
    }

    #[test]
    fn test_staged_file_name_ignores_declared_stem() {
        let id = DocumentId::new();
        let name = UploadedDocument::staged_file_name(id, "../../etc/passwd.png");
        assert_eq!(name, format!("{}.png", id));

        let bare = UploadedDocument::staged_file_name(id, "README");
        assert_eq!(bare, id.to_string());
    }

    #[test]
    fn test_unsupported_document_format() {
        let doc = UploadedDocument::new(DocumentId::new(), "/tmp/x", "letter.docx");
        let err = doc.format().unwrap_err();
        assert_eq!(err.extension, "docx");
    }

    #[test]
    fn test_ids_are_unique() {
        let first = DocumentId::new();
        let second = DocumentId::new();
        assert_ne!(first, second);
        assert_ne!(first.to_string(), second.to_string());
    }
}
