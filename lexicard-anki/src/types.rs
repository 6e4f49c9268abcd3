//! AnkiConnect wire types — one typed request per action.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// AnkiConnect protocol version sent with every request.
pub const API_VERSION: u8 = 6;

/// The AnkiConnect actions lexicard uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Availability probe.
    Version,
    /// List deck names.
    DeckNames,
    /// List note type names.
    ModelNames,
    /// List the fields of one note type.
    ModelFieldNames,
    /// Create one note.
    AddNote,
}

impl Action {
    /// Wire name of the action.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Version => "version",
            Self::DeckNames => "deckNames",
            Self::ModelNames => "modelNames",
            Self::ModelFieldNames => "modelFieldNames",
            Self::AddNote => "addNote",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request envelope.
#[derive(Debug, Serialize)]
pub struct AnkiRequest<'a, P: Serialize> {
    pub action: &'static str,
    pub version: u8,
    pub params: &'a P,
}

impl<'a, P: Serialize> AnkiRequest<'a, P> {
    /// Envelope for `action` at [`API_VERSION`].
    #[must_use]
    pub fn new(action: Action, params: &'a P) -> Self {
        Self {
            action: action.as_str(),
            version: API_VERSION,
            params,
        }
    }
}

/// Response envelope. `error` is checked before `result` is looked at.
#[derive(Debug, Deserialize)]
pub struct AnkiResponse {
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

/// Params for actions that take none; serializes as `{}`.
#[derive(Debug, Default, Serialize)]
pub struct NoParams {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelFieldNamesParams<'a> {
    pub model_name: &'a str,
}

#[derive(Debug, Serialize)]
pub struct AddNoteParams<'a> {
    pub note: &'a NewNote,
}

/// A note to be created by `addNote`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNote {
    pub deck_name: String,
    pub model_name: String,
    pub fields: BTreeMap<String, String>,
    pub tags: Vec<String>,
}

/// Identifier AnkiConnect assigns to a created note.
pub type NoteId = i64;
