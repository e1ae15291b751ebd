//! Question answering against the active document.

use askdoc_core::document::DocumentHandle;
use askdoc_core::remote::RemoteAnswerEngine;
use std::sync::Arc;

/// Fixed response when a question arrives before any document has been
/// uploaded. A soft failure, not an error.
pub const NO_DOCUMENT_SENTINEL: &str = "No document uploaded yet.";

/// Preamble combined with the user's question into a single request.
const QUESTION_PREAMBLE: &str = "Please answer this question about the uploaded document: ";

/// Sends a question plus the active document reference to the remote
/// engine and renders the outcome as text.
///
/// This component never mutates the transcript; the session use case
/// owns appending `(question, result)`, including error results, so
/// failed attempts stay visible in the conversation record.
pub struct QuestionAnswerer {
    engine: Arc<dyn RemoteAnswerEngine>,
}

impl QuestionAnswerer {
    pub fn new(engine: Arc<dyn RemoteAnswerEngine>) -> Self {
        Self { engine }
    }

    /// Answers `question` about `document`.
    ///
    /// Returns the engine's text verbatim on success. An absent
    /// document yields [`NO_DOCUMENT_SENTINEL`]; a remote failure
    /// yields a human-readable error string. Neither case raises.
    pub async fn ask(&self, question: &str, document: Option<&DocumentHandle>) -> String {
        let Some(handle) = document else {
            return NO_DOCUMENT_SENTINEL.to_string();
        };

        let prompt = format!("{QUESTION_PREAMBLE}{question}");
        match self.engine.answer(&prompt, handle).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("answer request failed: {e}");
                format!("Error generating response: {e}")
            }
        }
    }
}
