//! Error types for the procure-assist library.

use thiserror::Error;

/// Errors raised by assisted-extraction backends.
#[derive(Error, Debug)]
pub enum AssistError {
    /// The backend could not be constructed.
    #[error("backend configuration error: {0}")]
    Config(String),

    /// The HTTP request failed (network, TLS, timeout).
    #[error("request failed: {0}")]
    Request(String),

    /// The service answered with a non-success status.
    #[error("service returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body did not match the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for AssistError {
    fn from(err: reqwest::Error) -> Self {
        AssistError::Request(err.to_string())
    }
}
