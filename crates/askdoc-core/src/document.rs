//! Document types for the upload pipeline.
//!
//! A locally presented file travels through three shapes:
//! [`LocalDocument`] (validated raw bytes), [`DocumentIdentity`] (the
//! heuristic "is this a new file" key), and [`DocumentHandle`] (the opaque
//! reference returned by the remote store after ingestion).

use crate::error::{AskdocError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File extensions accepted for upload.
///
/// A presented file outside this set is rejected locally and never
/// reaches the upload coordinator or the remote store.
pub const SUPPORTED_EXTENSIONS: [&str; 9] = [
    "pdf", "docx", "txt", "md", "csv", "xlsx", "png", "jpg", "jpeg",
];

/// Returns true if `extension` (without the dot, any case) is accepted.
pub fn is_supported_extension(extension: &str) -> bool {
    let lower = extension.to_ascii_lowercase();
    SUPPORTED_EXTENSIONS.contains(&lower.as_str())
}

/// A file presented by the user, validated but not yet uploaded.
///
/// Construction enforces the local preconditions: non-empty name,
/// non-zero size, and a supported extension. Code holding a
/// `LocalDocument` can therefore assume all three.
#[derive(Debug, Clone)]
pub struct LocalDocument {
    file_name: String,
    bytes: Vec<u8>,
}

impl LocalDocument {
    /// Validates and wraps a presented file.
    ///
    /// # Errors
    ///
    /// - `InvalidDocument` if the name is empty or the content is zero bytes
    /// - `UnsupportedFileType` if the extension is outside the accepted set
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let file_name = file_name.into();
        if file_name.trim().is_empty() {
            return Err(AskdocError::invalid_document("file name is empty"));
        }
        if bytes.is_empty() {
            return Err(AskdocError::invalid_document(format!(
                "'{file_name}' is empty (0 bytes)"
            )));
        }

        let extension = Path::new(&file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");
        if !is_supported_extension(extension) {
            return Err(AskdocError::unsupported_file_type(extension));
        }

        Ok(Self { file_name, bytes })
    }

    /// The file name as presented, including its extension.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Raw file content.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Source byte size.
    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// The extension, lower-cased, without the dot.
    pub fn extension(&self) -> String {
        Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
    }

    /// MIME type guessed from the file name.
    pub fn mime_type(&self) -> String {
        mime_guess::from_path(&self.file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string()
    }

    /// The identity key used to detect whether this is a new file
    /// relative to the current session.
    pub fn identity(&self) -> DocumentIdentity {
        DocumentIdentity {
            file_name: self.file_name.clone(),
            size_bytes: self.size_bytes(),
        }
    }
}

/// Heuristic key for "same document": (file name, byte length).
///
/// Computed locally before any remote call. Two uploads with equal
/// identity are treated as the same document and trigger neither a
/// re-upload nor a history reset. This is deliberately not a content
/// hash; two different files sharing name and length are
/// indistinguishable here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentIdentity {
    /// The file name as presented locally.
    pub file_name: String,
    /// Source byte size.
    pub size_bytes: u64,
}

/// Opaque reference to a document already ingested by the remote store.
///
/// Owned exclusively by the session state; replaced (never mutated)
/// when a new file is uploaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentHandle {
    /// Opaque resource identifier assigned by the store (e.g. "files/abc123").
    pub name: String,
    /// URI used to reference the document in answer requests.
    pub uri: String,
    /// Human-readable display name.
    pub display_name: String,
    /// MIME type as recorded by the store.
    pub mime_type: String,
    /// Source byte size.
    pub size_bytes: u64,
}

/// Document metadata as reported by the remote store.
///
/// Retrieved after a successful upload for display purposes only;
/// a failed fetch falls back to [`DocumentMetadata::fallback_for`]
/// instead of failing the upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub display_name: String,
    pub mime_type: String,
    /// Remote processing state (e.g. "ACTIVE", "PROCESSING").
    pub processing_state: String,
}

impl DocumentMetadata {
    /// Locally known defaults used when the metadata fetch fails.
    pub fn fallback_for(file_name: &str) -> Self {
        Self {
            display_name: file_name.to_string(),
            mime_type: "unknown".to_string(),
            processing_state: "unknown".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported_extension("pdf"));
        assert!(is_supported_extension("PDF"));
        assert!(is_supported_extension("jpeg"));
        assert!(!is_supported_extension("exe"));
        assert!(!is_supported_extension(""));
    }

    #[test]
    fn test_new_validates_extension() {
        let err = LocalDocument::new("malware.exe", vec![1, 2, 3]).unwrap_err();
        assert!(matches!(
            err,
            AskdocError::UnsupportedFileType { ref extension } if extension == "exe"
        ));
    }

    #[test]
    fn test_new_rejects_missing_extension() {
        let err = LocalDocument::new("README", vec![1]).unwrap_err();
        assert!(err.is_local_rejection());
    }

    #[test]
    fn test_new_rejects_empty_name_and_content() {
        assert!(LocalDocument::new("", vec![1]).is_err());
        assert!(LocalDocument::new("report.pdf", vec![]).is_err());
    }

    #[test]
    fn test_identity_is_name_and_size() {
        let doc = LocalDocument::new("report.pdf", vec![0u8; 10240]).unwrap();
        assert_eq!(
            doc.identity(),
            DocumentIdentity {
                file_name: "report.pdf".to_string(),
                size_bytes: 10240,
            }
        );
    }

    #[test]
    fn test_same_name_and_size_share_identity() {
        // The known weak point of the heuristic: content is not inspected.
        let a = LocalDocument::new("report.pdf", vec![0u8; 64]).unwrap();
        let b = LocalDocument::new("report.pdf", vec![1u8; 64]).unwrap();
        assert_eq!(a.identity(), b.identity());
    }

    #[test]
    fn test_mime_type_guess() {
        let doc = LocalDocument::new("notes.md", vec![b'#']).unwrap();
        assert_eq!(doc.mime_type(), "text/markdown");
        let doc = LocalDocument::new("scan.png", vec![0u8; 8]).unwrap();
        assert_eq!(doc.mime_type(), "image/png");
    }

    #[test]
    fn test_metadata_fallback() {
        let meta = DocumentMetadata::fallback_for("report.pdf");
        assert_eq!(meta.display_name, "report.pdf");
        assert_eq!(meta.mime_type, "unknown");
        assert_eq!(meta.processing_state, "unknown");
    }
}
