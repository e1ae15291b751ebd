//! Session state model.
//!
//! `SessionState` is the sole place the session invariants are enforced:
//! history belongs to exactly one document, and the two are only ever
//! changed together through [`SessionState::replace_document`].

use super::turn::ConversationTurn;
use crate::document::{DocumentHandle, DocumentIdentity};
use uuid::Uuid;

/// Per-session state: the single active document and its transcript.
///
/// Created empty at session start and destroyed when the session ends;
/// there is no persistence across sessions. Every logical session owns
/// its own instance — there are no process-wide globals.
///
/// Fields are private on purpose. The only mutating operations are:
///
/// - [`replace_document`](Self::replace_document): atomic swap of the
///   active document and its identity, clearing the transcript
/// - [`append_turn`](Self::append_turn): append-only transcript growth
/// - [`set_engine_available`](Self::set_engine_available): caches the
///   per-session availability probe result
///
/// This keeps stale history from a previous document from ever
/// coexisting with a different active document.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Unique session identifier, used for logging only.
    id: String,
    active_document: Option<DocumentHandle>,
    active_identity: Option<DocumentIdentity>,
    history: Vec<ConversationTurn>,
    engine_available: bool,
}

impl SessionState {
    /// Creates an empty session: no document, no transcript, engine
    /// assumed unavailable until a probe succeeds.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            active_document: None,
            active_identity: None,
            history: Vec::new(),
            engine_available: false,
        }
    }

    /// The session identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The currently active document, if any.
    pub fn active_document(&self) -> Option<&DocumentHandle> {
        self.active_document.as_ref()
    }

    /// The identity key of the active document, if any.
    pub fn active_identity(&self) -> Option<&DocumentIdentity> {
        self.active_identity.as_ref()
    }

    /// The transcript, in insertion order.
    pub fn history(&self) -> &[ConversationTurn] {
        &self.history
    }

    /// The cached result of this session's availability probe.
    pub fn engine_available(&self) -> bool {
        self.engine_available
    }

    /// Caches the availability probe result for this session.
    pub fn set_engine_available(&mut self, available: bool) {
        self.engine_available = available;
    }

    /// Atomically replaces the active document and clears the transcript.
    ///
    /// The handle and identity are always replaced together; callers
    /// must pass the identity computed from the same presented file the
    /// handle was produced for.
    pub fn replace_document(&mut self, handle: DocumentHandle, identity: DocumentIdentity) {
        self.active_document = Some(handle);
        self.active_identity = Some(identity);
        self.history.clear();
    }

    /// Appends one turn to the transcript.
    pub fn append_turn(&mut self, turn: ConversationTurn) {
        self.history.push(turn);
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(name: &str, size: u64) -> DocumentHandle {
        DocumentHandle {
            name: format!("files/{name}"),
            uri: format!("https://example.invalid/{name}"),
            display_name: name.to_string(),
            mime_type: "application/pdf".to_string(),
            size_bytes: size,
        }
    }

    fn identity(name: &str, size: u64) -> DocumentIdentity {
        DocumentIdentity {
            file_name: name.to_string(),
            size_bytes: size,
        }
    }

    #[test]
    fn test_new_session_is_empty() {
        let state = SessionState::new();
        assert!(state.active_document().is_none());
        assert!(state.active_identity().is_none());
        assert!(state.history().is_empty());
        assert!(!state.engine_available());
        assert!(!state.id().is_empty());
    }

    #[test]
    fn test_replace_document_clears_history() {
        let mut state = SessionState::new();
        state.replace_document(handle("report.pdf", 10240), identity("report.pdf", 10240));
        state.append_turn(ConversationTurn::new("Q1", "A1"));
        state.append_turn(ConversationTurn::new("Q2", "A2"));
        assert_eq!(state.history().len(), 2);

        state.replace_document(
            handle("report_v2.pdf", 20480),
            identity("report_v2.pdf", 20480),
        );
        assert!(state.history().is_empty());
        assert_eq!(
            state.active_identity(),
            Some(&identity("report_v2.pdf", 20480))
        );
        assert_eq!(
            state.active_document().unwrap().display_name,
            "report_v2.pdf"
        );
    }

    #[test]
    fn test_append_preserves_order_and_text() {
        let mut state = SessionState::new();
        state.replace_document(handle("report.pdf", 10240), identity("report.pdf", 10240));
        for i in 0..3 {
            state.append_turn(ConversationTurn::new(format!("Q{i}"), format!("A{i}")));
        }
        let questions: Vec<_> = state.history().iter().map(|t| t.question.as_str()).collect();
        assert_eq!(questions, vec!["Q0", "Q1", "Q2"]);
    }

    #[test]
    fn test_unique_session_ids() {
        assert_ne!(SessionState::new().id(), SessionState::new().id());
    }
}
