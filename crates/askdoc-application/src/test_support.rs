//! Mock remote services for use-case tests.

use askdoc_core::document::{DocumentHandle, DocumentMetadata};
use askdoc_core::error::{AskdocError, Result};
use askdoc_core::remote::{RemoteAnswerEngine, RemoteDocumentStore};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// In-memory document store that records every call it receives.
#[derive(Default)]
pub struct MockStore {
    pub upload_calls: AtomicUsize,
    pub metadata_calls: AtomicUsize,
    pub fail_upload: AtomicBool,
    pub fail_metadata: AtomicBool,
    /// Staged paths seen by `upload`, paired with whether the staged
    /// file existed at call time.
    pub staged: Mutex<Vec<(PathBuf, bool)>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_upload() -> Self {
        let store = Self::default();
        store.fail_upload.store(true, Ordering::SeqCst);
        store
    }

    pub fn handle_for(display_name: &str, mime_type: &str, size_bytes: u64) -> DocumentHandle {
        DocumentHandle {
            name: format!("files/mock-{display_name}"),
            uri: format!("https://example.invalid/files/mock-{display_name}"),
            display_name: display_name.to_string(),
            mime_type: mime_type.to_string(),
            size_bytes,
        }
    }
}

#[async_trait]
impl RemoteDocumentStore for MockStore {
    async fn upload(
        &self,
        staged: &Path,
        display_name: &str,
        mime_type: &str,
    ) -> Result<DocumentHandle> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        let exists = staged.exists();
        let size = std::fs::metadata(staged).map(|m| m.len()).unwrap_or(0);
        self.staged
            .lock()
            .unwrap()
            .push((staged.to_path_buf(), exists));

        if self.fail_upload.load(Ordering::SeqCst) {
            return Err(AskdocError::remote_upload("mock upload failure"));
        }
        Ok(Self::handle_for(display_name, mime_type, size))
    }

    async fn get_metadata(&self, handle: &DocumentHandle) -> Result<DocumentMetadata> {
        self.metadata_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_metadata.load(Ordering::SeqCst) {
            return Err(AskdocError::remote_metadata("mock metadata failure"));
        }
        Ok(DocumentMetadata {
            display_name: handle.display_name.clone(),
            mime_type: handle.mime_type.clone(),
            processing_state: "ACTIVE".to_string(),
        })
    }
}

/// Answer engine stub with scripted probe/answer behavior.
pub struct MockEngine {
    pub probe_ok: AtomicBool,
    pub probe_calls: AtomicUsize,
    pub answer_calls: AtomicUsize,
    pub fail_answer: AtomicBool,
    pub response: String,
    /// Prompts received by `answer`, in call order.
    pub prompts: Mutex<Vec<String>>,
}

impl MockEngine {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            probe_ok: AtomicBool::new(true),
            probe_calls: AtomicUsize::new(0),
            answer_calls: AtomicUsize::new(0),
            fail_answer: AtomicBool::new(false),
            response: response.into(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn unreachable_engine() -> Self {
        let engine = Self::new("");
        engine.probe_ok.store(false, Ordering::SeqCst);
        engine
    }
}

#[async_trait]
impl RemoteAnswerEngine for MockEngine {
    async fn probe(&self) -> Result<()> {
        self.probe_calls.fetch_add(1, Ordering::SeqCst);
        if self.probe_ok.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(AskdocError::remote_answer("mock probe failure"))
        }
    }

    async fn answer(&self, prompt: &str, _handle: &DocumentHandle) -> Result<String> {
        self.answer_calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        if self.fail_answer.load(Ordering::SeqCst) {
            return Err(AskdocError::remote_answer("mock answer failure"));
        }
        Ok(self.response.clone())
    }
}
