//! # lexicard Core Library
//!
//! The pure half of the card pipeline. Model output goes in, a
//! presentation-ready card comes out:
//!
//! ```text
//! raw model text ──parse_response──▶ GeneratedCard ──assemble──▶ DisplayCard
//! ```
//!
//! - [`parser`] — tolerant extraction of the JSON payload from free-form text
//! - [`assembler`] — deterministic formatting into display blocks
//! - [`language`] — field names and tags derived from the target language
//! - [`config`] — `lexicard.toml` loading and validation
//!
//! Nothing here performs network I/O; the AI provider lives in
//! `lexicard-llm` and the note store in `lexicard-anki`.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod assembler;
pub mod config;
pub mod error;
pub mod language;
pub mod parser;
pub mod types;

pub use assembler::assemble;
pub use config::LexicardConfig;
pub use error::LexicardError;
pub use language::{LanguageProfile, RichFields};
pub use parser::parse_response;
pub use types::{DisplayCard, GeneratedCard, GenerationRequest};
