//! Assisted-extraction abstraction layer for procure.
//!
//! This crate provides a unified interface for submitting document text to
//! an external reasoning service and getting a structured field map back:
//! - `OpenAiBackend` for OpenAI-compatible chat-completion endpoints
//! - test doubles implementing [`AssistBackend`] directly

mod backend;
mod error;

pub use backend::openai::{OpenAiBackend, OpenAiConfig};
pub use backend::AssistBackend;
pub use error::AssistError;

/// Result type for assisted-extraction operations.
pub type Result<T> = std::result::Result<T, AssistError>;
