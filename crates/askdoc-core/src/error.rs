//! Error types for the askdoc application.

use thiserror::Error;

/// A shared error type for the entire askdoc application.
///
/// This provides typed, structured error variants so failure paths stay
/// visible in signatures instead of relying on catch-all unwinds. Remote
/// failures are always caught at the boundary of the component that issued
/// them; none of these variants is allowed to terminate a session.
#[derive(Error, Debug, Clone)]
pub enum AskdocError {
    /// The remote engine is unreachable or misconfigured.
    ///
    /// Fatal for the session until resolved; blocks all upload and
    /// question actions.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A fresh availability probe has not succeeded for this session.
    #[error("Engine unavailable: no successful availability probe for this session")]
    EngineUnavailable,

    /// The presented file's extension is outside the accepted set.
    ///
    /// Raised by local validation, before any remote call is made.
    #[error("Unsupported file type: '{extension}'")]
    UnsupportedFileType { extension: String },

    /// The presented file failed a local precondition (empty name, zero size).
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// The remote document store rejected or failed an upload.
    #[error("Upload failed: {0}")]
    RemoteUpload(String),

    /// The remote document store failed a metadata fetch.
    #[error("Metadata fetch failed: {0}")]
    RemoteMetadata(String),

    /// The remote answer engine failed a generate-content request.
    #[error("Answer request failed: {0}")]
    RemoteAnswer(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },
}

impl AskdocError {
    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an UnsupportedFileType error
    pub fn unsupported_file_type(extension: impl Into<String>) -> Self {
        Self::UnsupportedFileType {
            extension: extension.into(),
        }
    }

    /// Creates an InvalidDocument error
    pub fn invalid_document(message: impl Into<String>) -> Self {
        Self::InvalidDocument(message.into())
    }

    /// Creates a RemoteUpload error
    pub fn remote_upload(message: impl Into<String>) -> Self {
        Self::RemoteUpload(message.into())
    }

    /// Creates a RemoteMetadata error
    pub fn remote_metadata(message: impl Into<String>) -> Self {
        Self::RemoteMetadata(message.into())
    }

    /// Creates a RemoteAnswer error
    pub fn remote_answer(message: impl Into<String>) -> Self {
        Self::RemoteAnswer(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Check if this is a Config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this error blocks remote actions until a fresh probe succeeds
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::EngineUnavailable)
    }

    /// Check if this is a local validation error (no remote call was made)
    pub fn is_local_rejection(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFileType { .. } | Self::InvalidDocument(_)
        )
    }
}

impl From<std::io::Error> for AskdocError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for AskdocError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, AskdocError>`.
pub type Result<T> = std::result::Result<T, AskdocError>;
