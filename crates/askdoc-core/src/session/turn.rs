//! Transcript entry type.

use serde::{Deserialize, Serialize};

/// One (question, answer) pair in the session transcript.
///
/// Turns are append-only and keep insertion order; they are never
/// reordered or deduplicated. A failed answer attempt is recorded like
/// any other turn, with the human-readable error string as its answer,
/// so the transcript stays a complete record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// The question exactly as submitted.
    pub question: String,
    /// The engine's textual response, verbatim.
    pub answer: String,
    /// Timestamp when the turn was recorded (ISO 8601 format).
    pub timestamp: String,
}

impl ConversationTurn {
    /// Creates a turn stamped with the current time.
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
