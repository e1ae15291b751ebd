//! Session domain module.
//!
//! This module contains the session state and transcript types.
//!
//! # Module Structure
//!
//! - `model`: Core session state (`SessionState`), the single
//!   enforcement point for the document/history invariants
//! - `turn`: Transcript entry type (`ConversationTurn`)

mod model;
mod turn;

// Re-export public API
pub use model::SessionState;
pub use turn::ConversationTurn;
