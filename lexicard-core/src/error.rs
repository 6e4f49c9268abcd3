//! Error types for the lexicard core library.

use thiserror::Error;

/// Top-level error type for parsing, assembly and configuration.
#[derive(Error, Debug)]
pub enum LexicardError {
    /// The model output contained no `{ ... }` span to decode.
    #[error("No structured payload found in model output")]
    NoStructuredPayload,

    /// A `{ ... }` span was found but could not be decoded as a card.
    #[error("Failed to decode card payload: {reason} (payload: '{payload}')")]
    PayloadDecode {
        /// The extracted substring that failed to decode.
        payload: String,
        /// Decoder message.
        reason: String,
    },

    /// Configuration is missing, unreadable or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, LexicardError>;
