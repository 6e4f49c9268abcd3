//! # lexicard-anki — AnkiConnect Integration for lexicard
//!
//! This crate files display cards produced by `lexicard-core` into Anki
//! through the AnkiConnect add-on.
//!
//! ## Architecture
//!
//! ```text
//! DisplayCard
//!     │
//!     ▼
//! ┌──────────────────────── NoteSubmitter ────────────────────────┐
//! │  version (probe) ─▶ modelNames ─▶ modelFieldNames ─▶ addNote  │
//! │                     └── schema ──┘      │                     │
//! │                                   build_field_mapping         │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `client` — typed AnkiConnect actions over HTTP
//! - `schema` — note-type selection; degrades to Front/Back on failure
//! - `mapping` — rich vs. generic field layout
//! - `submit` — one call that probes, resolves, maps and creates

pub mod client;
pub mod error;
pub mod mapping;
pub mod schema;
pub mod submit;
pub mod types;

pub use client::AnkiClient;
pub use error::AnkiError;
pub use mapping::{FieldMapping, MappingLayout};
pub use schema::NoteSchema;
pub use submit::{NoteSubmitter, Submission};
