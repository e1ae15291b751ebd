//! Application layer for askdoc.
//!
//! This crate provides the use-case implementations that coordinate the
//! domain layer with the remote AI service: the availability probe that
//! gates everything, the upload coordinator that manages the active
//! document lifecycle, the question answerer, and the session use case
//! that wires them around one `SessionState` instance.

pub mod answer;
pub mod availability;
pub mod session_usecase;
pub mod upload;

pub use answer::{NO_DOCUMENT_SENTINEL, QuestionAnswerer};
pub use availability::AvailabilityProbe;
pub use session_usecase::{ENGINE_UNAVAILABLE_MESSAGE, SessionUseCase};
pub use upload::UploadCoordinator;

#[cfg(test)]
pub(crate) mod test_support;
