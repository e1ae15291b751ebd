//! Remote service traits.
//!
//! The remote AI service is an external collaborator reached through
//! two narrow interfaces: a document store that ingests raw files and a
//! generate-content engine that answers questions about them. These
//! traits decouple the session logic from the concrete HTTP client so
//! the lifecycle invariants can be tested against mocks.

use crate::document::{DocumentHandle, DocumentMetadata};
use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// An abstract store that ingests documents natively (no text
/// extraction) and hands back opaque references to them.
#[async_trait]
pub trait RemoteDocumentStore: Send + Sync {
    /// Uploads the staged file to the remote store.
    ///
    /// # Arguments
    ///
    /// * `staged` - Path to the transient local copy of the file; the
    ///   caller owns its lifetime and deletes it after this call returns
    /// * `display_name` - Human-readable name recorded with the upload
    /// * `mime_type` - MIME type of the file content
    ///
    /// # Returns
    ///
    /// - `Ok(DocumentHandle)`: The store accepted the file
    /// - `Err(RemoteUpload)`: Network/auth/quota failure; nothing was
    ///   ingested as far as the caller is concerned
    async fn upload(
        &self,
        staged: &Path,
        display_name: &str,
        mime_type: &str,
    ) -> Result<DocumentHandle>;

    /// Fetches display metadata for an already-ingested document.
    ///
    /// Failure here must not abort the surrounding upload; callers fall
    /// back to locally known values instead.
    async fn get_metadata(&self, handle: &DocumentHandle) -> Result<DocumentMetadata>;
}

/// An abstract generate-content engine that answers questions about an
/// ingested document.
#[async_trait]
pub trait RemoteAnswerEngine: Send + Sync {
    /// One lightweight round-trip to confirm configuration and
    /// connectivity, implemented as a minimal generate-content call.
    async fn probe(&self) -> Result<()>;

    /// Submits a combined request of `prompt` plus a reference to
    /// `handle` and returns the engine's textual response verbatim.
    async fn answer(&self, prompt: &str, handle: &DocumentHandle) -> Result<String>;
}
