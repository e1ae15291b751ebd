//! Session use case implementation.
//!
//! `SessionUseCase` wires the availability probe, upload coordinator,
//! and question answerer around exactly one `SessionState` instance.
//! One logical session, one instance, no globals; a surrounding
//! application that serves several users creates one use case per
//! session, sharing nothing.

use crate::answer::QuestionAnswerer;
use crate::availability::AvailabilityProbe;
use crate::upload::UploadCoordinator;
use askdoc_core::document::{DocumentHandle, DocumentMetadata, LocalDocument};
use askdoc_core::error::{AskdocError, Result};
use askdoc_core::remote::{RemoteAnswerEngine, RemoteDocumentStore};
use askdoc_core::session::{ConversationTurn, SessionState};
use std::sync::Arc;

/// Fallback message rendered while no successful probe is cached.
pub const ENGINE_UNAVAILABLE_MESSAGE: &str = "The answer engine is currently unavailable. Please try again later or check your internet connection.";

/// Orchestrates one user's document Q&A session.
///
/// All methods take `&mut self`: a session processes one user-initiated
/// action at a time and its state is never mutated concurrently.
pub struct SessionUseCase {
    state: SessionState,
    probe: AvailabilityProbe,
    coordinator: UploadCoordinator,
    answerer: QuestionAnswerer,
    /// Metadata of the active document, cached for display. Lives here
    /// rather than on `SessionState`, whose shape is fixed to the
    /// lifecycle invariants.
    document_info: Option<DocumentMetadata>,
}

impl SessionUseCase {
    /// Creates a use case for a fresh, empty session.
    pub fn new(store: Arc<dyn RemoteDocumentStore>, engine: Arc<dyn RemoteAnswerEngine>) -> Self {
        Self {
            state: SessionState::new(),
            probe: AvailabilityProbe::new(engine.clone()),
            coordinator: UploadCoordinator::new(store),
            answerer: QuestionAnswerer::new(engine),
            document_info: None,
        }
    }

    /// Runs the once-per-session availability probe and caches the
    /// result. Uploads and questions stay blocked until this (or a
    /// later [`reprobe`](Self::reprobe)) returns true.
    pub async fn initialize(&mut self) -> bool {
        let available = self.probe.check_availability().await;
        self.state.set_engine_available(available);
        tracing::info!(
            session = %self.state.id(),
            available,
            "session initialized"
        );
        available
    }

    /// Runs a fresh probe on demand, e.g. after the user fixed their
    /// configuration.
    pub async fn reprobe(&mut self) -> bool {
        let available = self.probe.check_availability().await;
        self.state.set_engine_available(available);
        available
    }

    /// The cached availability probe result.
    pub fn engine_available(&self) -> bool {
        self.state.engine_available()
    }

    /// Uploads a presented file and returns its display metadata.
    ///
    /// Re-presenting the active document's (name, size) identity makes
    /// no remote call at all: the cached metadata is returned and the
    /// transcript survives. A genuinely new file is uploaded, becomes
    /// the active document, and resets the transcript; its metadata is
    /// then fetched with a local fallback that never fails the upload.
    pub async fn upload(&mut self, document: &LocalDocument) -> Result<DocumentMetadata> {
        let already_active = self.state.active_identity() == Some(&document.identity());
        let handle = self.coordinator.submit(&mut self.state, document).await?;

        if !already_active {
            self.document_info = None;
        }
        let info = match self.document_info.clone() {
            Some(info) => info,
            None => {
                let info = self.coordinator.fetch_info(&handle).await;
                self.document_info = Some(info.clone());
                info
            }
        };
        Ok(info)
    }

    /// Asks a question about the active document and records the turn.
    ///
    /// The remote outcome — answer text or a human-readable error
    /// string — is appended to the transcript either way, so failed
    /// attempts remain inspectable. A question asked before any upload
    /// returns the no-document sentinel without touching the
    /// transcript.
    ///
    /// # Errors
    ///
    /// `EngineUnavailable` when no successful probe is cached; no
    /// remote call is attempted in that case.
    pub async fn ask(&mut self, question: &str) -> Result<String> {
        if !self.state.engine_available() {
            return Err(AskdocError::EngineUnavailable);
        }

        let answer = self
            .answerer
            .ask(question, self.state.active_document())
            .await;

        if self.state.active_document().is_some() {
            self.state
                .append_turn(ConversationTurn::new(question, answer.clone()));
        }
        Ok(answer)
    }

    /// The session identifier (logging only).
    pub fn session_id(&self) -> &str {
        self.state.id()
    }

    /// The transcript, in insertion order.
    pub fn history(&self) -> &[ConversationTurn] {
        self.state.history()
    }

    /// The currently active document, if any.
    pub fn active_document(&self) -> Option<&DocumentHandle> {
        self.state.active_document()
    }

    /// Cached display metadata for the active document.
    pub fn document_info(&self) -> Option<&DocumentMetadata> {
        self.document_info.as_ref()
    }
}
