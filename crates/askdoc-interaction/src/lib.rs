//! Remote layer for askdoc.
//!
//! Concrete Gemini REST implementations of the `askdoc-core` remote
//! traits, plus secret configuration loading. Everything here is
//! replaceable behind `RemoteDocumentStore` / `RemoteAnswerEngine`;
//! the session logic never sees an HTTP type.

pub mod config;
pub mod gemini_answer_engine;
pub mod gemini_file_store;

pub use config::{API_KEY_ENV_VAR, GeminiConfig, SecretConfig, load_secret_config, resolve_api_key};
pub use gemini_answer_engine::{DEFAULT_GEMINI_MODEL, GeminiAnswerEngine};
pub use gemini_file_store::GeminiFileStore;
