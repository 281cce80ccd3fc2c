//! Assisted-extraction backend implementations.

pub mod openai;

use crate::Result;

/// Trait for assisted-extraction backends.
///
/// A backend takes a system role plus a user prompt (the prompt embeds a
/// bounded document excerpt and the required field schema) and returns the
/// raw completion text. Callers parse the completion themselves; a backend
/// only guarantees transport and response-shape handling.
pub trait AssistBackend: Send + Sync {
    /// Submit a prompt and return the completion text.
    ///
    /// Implementations must bound the call with a timeout; a slow or
    /// unreachable service surfaces as an error, never a hang.
    fn complete(&self, system: &str, prompt: &str) -> Result<String>;

    /// Backend identifier used in logs.
    fn name(&self) -> &str;
}
