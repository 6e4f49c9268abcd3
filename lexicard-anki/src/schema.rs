//! Note-type selection and field introspection.
//!
//! The schema is fetched fresh for every submission; the user may edit
//! note types in Anki while a session is running.

use tracing::{debug, warn};

use crate::client::AnkiClient;
use crate::error::AnkiError;

/// Note type used when no note type name contains the hint.
pub const DEFAULT_NOTE_TYPE: &str = "Basic";

/// Field layout assumed when field introspection fails.
pub const DEFAULT_FIELDS: [&str; 2] = ["Front", "Back"];

/// Note type chosen for a submission together with its field names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteSchema {
    /// Note type ("model") the note is created with.
    pub note_type_name: String,
    /// Field names in note-type order, without duplicates.
    pub field_names: Vec<String>,
    /// Set when introspection failed and [`DEFAULT_FIELDS`] were substituted.
    pub degraded: bool,
}

impl NoteSchema {
    #[must_use]
    pub fn new(note_type_name: impl Into<String>, field_names: Vec<String>) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(field_names.len());
        for name in field_names {
            if !unique.contains(&name) {
                unique.push(name);
            }
        }
        Self {
            note_type_name: note_type_name.into(),
            field_names: unique,
            degraded: false,
        }
    }

    /// The two-field front/back schema used when introspection fails.
    #[must_use]
    pub fn degraded(note_type_name: impl Into<String>) -> Self {
        Self {
            degraded: true,
            ..Self::new(
                note_type_name,
                DEFAULT_FIELDS.iter().map(ToString::to_string).collect(),
            )
        }
    }

    #[must_use]
    pub fn has_field(&self, name: &str) -> bool {
        self.field_names.iter().any(|f| f == name)
    }

    /// Whether every name in `names` is a field of this schema.
    #[must_use]
    pub fn contains_all(&self, names: &[&str]) -> bool {
        names.iter().all(|n| self.has_field(n))
    }
}

/// Pick the first note type whose name contains `hint`, ignoring case.
/// Falls back to [`DEFAULT_NOTE_TYPE`].
#[must_use]
pub fn select_note_type(note_types: &[String], hint: &str) -> String {
    let hint = hint.trim().to_lowercase();
    if hint.is_empty() {
        return DEFAULT_NOTE_TYPE.to_string();
    }

    note_types
        .iter()
        .find(|name| name.to_lowercase().contains(&hint))
        .cloned()
        .unwrap_or_else(|| DEFAULT_NOTE_TYPE.to_string())
}

/// Resolve the note schema for a submission.
///
/// Failing to list note types is an error. Failing to list the chosen
/// type's fields is not: a warning is logged and a degraded front/back
/// schema is returned so the submission can still go through.
pub async fn resolve(client: &AnkiClient, hint: &str) -> Result<NoteSchema, AnkiError> {
    let note_types = client.model_names().await?;
    let note_type = select_note_type(&note_types, hint);
    debug!(%note_type, %hint, "selected note type");

    match client.model_field_names(&note_type).await {
        Ok(fields) => Ok(NoteSchema::new(note_type, fields)),
        Err(e) => {
            warn!(
                %note_type,
                error = %e,
                "could not get field names, falling back to Front/Back layout"
            );
            Ok(NoteSchema::degraded(note_type))
        }
    }
}
