//! AnkiConnect error types.

use thiserror::Error;

/// Errors from the note store or from submitting a card to it.
#[derive(Debug, Error)]
pub enum AnkiError {
    /// The availability probe failed.
    #[error("AnkiConnect is not available at {url}: {reason}")]
    Unreachable { url: String, reason: String },

    /// Transport-level failure talking to AnkiConnect.
    #[error("AnkiConnect request failed: {0}")]
    Transport(String),

    /// AnkiConnect answered with a non-success HTTP status.
    #[error("AnkiConnect request failed with status: {0}")]
    Status(u16),

    /// The envelope carried a non-null `error`.
    #[error("AnkiConnect error on '{action}': {message}")]
    Rpc { action: String, message: String },

    /// The envelope or its `result` did not have the expected shape.
    #[error("Failed to decode AnkiConnect response for '{action}': {reason}")]
    Decode { action: String, reason: String },
}

impl From<reqwest::Error> for AnkiError {
    fn from(err: reqwest::Error) -> Self {
        AnkiError::Transport(err.to_string())
    }
}
