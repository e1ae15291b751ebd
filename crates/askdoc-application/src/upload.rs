//! Upload coordination: the active-document lifecycle.

use askdoc_core::document::{DocumentHandle, DocumentMetadata, LocalDocument};
use askdoc_core::error::{AskdocError, Result};
use askdoc_core::remote::RemoteDocumentStore;
use askdoc_core::session::SessionState;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tempfile::NamedTempFile;

/// Decides whether a newly presented file is "new" relative to the
/// current session, triggers the remote upload, and swaps the session
/// state on change.
pub struct UploadCoordinator {
    store: Arc<dyn RemoteDocumentStore>,
}

impl UploadCoordinator {
    pub fn new(store: Arc<dyn RemoteDocumentStore>) -> Self {
        Self { store }
    }

    /// Submits a presented file for ingestion.
    ///
    /// Re-presenting a file with the identity (name, size) of the
    /// current active document short-circuits: the existing handle is
    /// returned, no remote call is made, and the transcript survives.
    /// Otherwise the bytes are staged to a transient local file, the
    /// store is called, and on success the active document and
    /// identity are replaced together while the transcript is cleared.
    /// On any upload failure the session state is left untouched.
    ///
    /// # Errors
    ///
    /// - `EngineUnavailable` if no successful probe is cached
    /// - `Io` if staging the bytes fails
    /// - `RemoteUpload` from the store
    pub async fn submit(
        &self,
        state: &mut SessionState,
        document: &LocalDocument,
    ) -> Result<DocumentHandle> {
        if !state.engine_available() {
            return Err(AskdocError::EngineUnavailable);
        }

        let identity = document.identity();
        if state.active_identity() == Some(&identity) {
            if let Some(handle) = state.active_document() {
                tracing::debug!(
                    file = %identity.file_name,
                    "identity unchanged; skipping re-upload"
                );
                return Ok(handle.clone());
            }
        }

        // The staging file lives exactly as long as the remote call.
        let staged = StagedDocument::create(document)?;
        let uploaded = self
            .store
            .upload(staged.path(), document.file_name(), &document.mime_type())
            .await;
        drop(staged);

        let handle = uploaded?;
        tracing::info!(
            file = %identity.file_name,
            handle = %handle.name,
            "document uploaded; session transcript reset"
        );
        state.replace_document(handle.clone(), identity);
        Ok(handle)
    }

    /// Fetches display metadata for an uploaded document.
    ///
    /// Upload success was already decided by [`submit`](Self::submit);
    /// a failure here falls back to locally known values instead of
    /// surfacing an error.
    pub async fn fetch_info(&self, handle: &DocumentHandle) -> DocumentMetadata {
        match self.store.get_metadata(handle).await {
            Ok(info) => info,
            Err(e) => {
                tracing::warn!("metadata fetch failed, using local fallback: {e}");
                DocumentMetadata::fallback_for(&handle.display_name)
            }
        }
    }
}

/// Scoped temporary copy of a presented file, written for the remote
/// store to read and deleted when dropped, on every exit path.
struct StagedDocument {
    file: NamedTempFile,
}

impl StagedDocument {
    fn create(document: &LocalDocument) -> Result<Self> {
        let suffix = format!(".{}", document.extension());
        let mut file = tempfile::Builder::new().suffix(&suffix).tempfile()?;
        file.write_all(document.bytes())?;
        file.flush()?;
        Ok(Self { file })
    }

    fn path(&self) -> &Path {
        self.file.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockStore;
    use std::sync::atomic::Ordering;

    fn ready_state() -> SessionState {
        let mut state = SessionState::new();
        state.set_engine_available(true);
        state
    }

    fn pdf(name: &str, size: usize) -> LocalDocument {
        LocalDocument::new(name, vec![0u8; size]).unwrap()
    }

    #[tokio::test]
    async fn test_submit_uploads_and_replaces_state() {
        let store = Arc::new(MockStore::new());
        let coordinator = UploadCoordinator::new(store.clone());
        let mut state = ready_state();

        let handle = coordinator
            .submit(&mut state, &pdf("report.pdf", 10240))
            .await
            .unwrap();

        assert_eq!(store.upload_calls.load(Ordering::SeqCst), 1);
        assert_eq!(handle.size_bytes, 10240);
        assert_eq!(state.active_document(), Some(&handle));
        assert_eq!(state.active_identity().unwrap().file_name, "report.pdf");
        assert!(state.history().is_empty());
    }

    #[tokio::test]
    async fn test_submit_is_gated_on_availability() {
        let store = Arc::new(MockStore::new());
        let coordinator = UploadCoordinator::new(store.clone());
        let mut state = SessionState::new();

        let err = coordinator
            .submit(&mut state, &pdf("report.pdf", 64))
            .await
            .unwrap_err();

        assert!(err.is_unavailable());
        assert_eq!(store.upload_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_resubmitting_same_identity_short_circuits() {
        let store = Arc::new(MockStore::new());
        let coordinator = UploadCoordinator::new(store.clone());
        let mut state = ready_state();

        let first = coordinator
            .submit(&mut state, &pdf("report.pdf", 10240))
            .await
            .unwrap();
        state.append_turn(askdoc_core::ConversationTurn::new("Q", "A"));

        let second = coordinator
            .submit(&mut state, &pdf("report.pdf", 10240))
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(store.upload_calls.load(Ordering::SeqCst), 1);
        // The transcript survived the re-submission.
        assert_eq!(state.history().len(), 1);
    }

    #[tokio::test]
    async fn test_different_identity_replaces_and_clears_history() {
        let store = Arc::new(MockStore::new());
        let coordinator = UploadCoordinator::new(store.clone());
        let mut state = ready_state();

        coordinator
            .submit(&mut state, &pdf("report.pdf", 10240))
            .await
            .unwrap();
        state.append_turn(askdoc_core::ConversationTurn::new("Q", "A"));

        let handle = coordinator
            .submit(&mut state, &pdf("report_v2.pdf", 20480))
            .await
            .unwrap();

        assert_eq!(store.upload_calls.load(Ordering::SeqCst), 2);
        assert!(state.history().is_empty());
        assert_eq!(state.active_document(), Some(&handle));
        assert_eq!(state.active_identity().unwrap().file_name, "report_v2.pdf");
    }

    #[tokio::test]
    async fn test_upload_failure_leaves_state_unchanged() {
        let ok_store = Arc::new(MockStore::new());
        let coordinator = UploadCoordinator::new(ok_store);
        let mut state = ready_state();
        let original = coordinator
            .submit(&mut state, &pdf("report.pdf", 10240))
            .await
            .unwrap();
        state.append_turn(askdoc_core::ConversationTurn::new("Q", "A"));

        let failing = UploadCoordinator::new(Arc::new(MockStore::failing_upload()));
        let err = failing
            .submit(&mut state, &pdf("other.pdf", 999))
            .await
            .unwrap_err();

        assert!(matches!(err, AskdocError::RemoteUpload(_)));
        assert_eq!(state.active_document(), Some(&original));
        assert_eq!(state.history().len(), 1);
    }

    #[tokio::test]
    async fn test_staging_file_exists_during_call_and_is_deleted_after() {
        let store = Arc::new(MockStore::new());
        let coordinator = UploadCoordinator::new(store.clone());
        let mut state = ready_state();

        coordinator
            .submit(&mut state, &pdf("report.pdf", 128))
            .await
            .unwrap();

        let staged = store.staged.lock().unwrap();
        let (path, existed_during_call) = &staged[0];
        assert!(existed_during_call);
        assert!(!path.exists());
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("pdf"));
    }

    #[tokio::test]
    async fn test_staging_file_deleted_on_upload_failure() {
        let store = Arc::new(MockStore::failing_upload());
        let coordinator = UploadCoordinator::new(store.clone());
        let mut state = ready_state();

        coordinator
            .submit(&mut state, &pdf("report.pdf", 128))
            .await
            .unwrap_err();

        let staged = store.staged.lock().unwrap();
        let (path, existed_during_call) = &staged[0];
        assert!(existed_during_call);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_fetch_info_falls_back_on_failure() {
        let store = Arc::new(MockStore::new());
        store
            .fail_metadata
            .store(true, std::sync::atomic::Ordering::SeqCst);
        let coordinator = UploadCoordinator::new(store);

        let handle = MockStore::handle_for("report.pdf", "application/pdf", 10);
        let info = coordinator.fetch_info(&handle).await;

        assert_eq!(info.display_name, "report.pdf");
        assert_eq!(info.mime_type, "unknown");
        assert_eq!(info.processing_state, "unknown");
    }
}
