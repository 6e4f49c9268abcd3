//! LLM error types.

use thiserror::Error;

/// Errors that can occur during LLM operations.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Transport-level failure (DNS, connect, reset).
    #[error("LLM request failed: {0}")]
    Network(String),

    /// The attempt exceeded its timeout.
    #[error("LLM request timed out after {0}ms")]
    Timeout(u64),

    /// Provider answered with a non-success status.
    #[error("LLM API request failed with status {status} and body {body}")]
    Upstream { status: u16, body: String },

    /// Success status, but the body is not the provider's envelope.
    #[error("Failed to decode LLM response envelope: {0}")]
    MalformedEnvelope(String),

    /// Envelope decoded but holds no usable text.
    #[error("No content in LLM response from model '{0}'")]
    EmptyResponse(String),

    /// Primary and fallback model both failed.
    #[error(
        "both model requests failed; primary '{primary_model}' error: {primary}; fallback '{fallback_model}' error: {fallback}"
    )]
    BothModelsFailed {
        primary_model: String,
        primary: Box<LlmError>,
        fallback_model: String,
        fallback: Box<LlmError>,
    },

    /// Configuration error.
    #[error("LLM configuration error: {0}")]
    ConfigError(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout(0)
        } else if err.is_decode() {
            LlmError::MalformedEnvelope(err.to_string())
        } else {
            LlmError::Network(err.to_string())
        }
    }
}
