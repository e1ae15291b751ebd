//! Domain layer for askdoc.
//!
//! This crate holds the types and invariants of the document Q&A
//! session lifecycle: the per-session state, the document shapes, the
//! shared error taxonomy, and the traits the remote AI service is
//! reached through. It performs no I/O; the concrete HTTP client lives
//! in `askdoc-interaction` and the orchestration in
//! `askdoc-application`.

pub mod document;
pub mod error;
pub mod remote;
pub mod session;

// Re-export common types
pub use document::{
    DocumentHandle, DocumentIdentity, DocumentMetadata, LocalDocument, SUPPORTED_EXTENSIONS,
};
pub use error::{AskdocError, Result};
pub use remote::{RemoteAnswerEngine, RemoteDocumentStore};
pub use session::{ConversationTurn, SessionState};
