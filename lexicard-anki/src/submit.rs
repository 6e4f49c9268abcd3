//! Note submission: probe → resolve schema → map fields → `addNote`.

use lexicard_core::language::LanguageProfile;
use lexicard_core::types::DisplayCard;
use tracing::info;

use crate::client::AnkiClient;
use crate::error::AnkiError;
use crate::mapping::{build_field_mapping, MappingLayout};
use crate::schema::{self, NoteSchema};
use crate::types::{NewNote, NoteId};

/// Outcome of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub note_id: NoteId,
    pub note_type: String,
    pub layout: MappingLayout,
    /// Set when the schema was the front/back fallback.
    pub degraded: bool,
}

/// Files display cards into one deck.
///
/// Not idempotent: submitting the same card twice creates two notes.
/// Duplicate handling is left to Anki.
#[derive(Debug, Clone)]
pub struct NoteSubmitter {
    client: AnkiClient,
    deck_name: String,
    language: LanguageProfile,
}

impl NoteSubmitter {
    #[must_use]
    pub fn new(
        client: AnkiClient,
        deck_name: impl Into<String>,
        language: LanguageProfile,
    ) -> Self {
        Self {
            client,
            deck_name: deck_name.into(),
            language,
        }
    }

    #[must_use]
    pub fn client(&self) -> &AnkiClient {
        &self.client
    }

    #[must_use]
    pub fn deck_name(&self) -> &str {
        &self.deck_name
    }

    /// Probe the store, resolve a fresh schema and create the note.
    pub async fn submit(&self, card: &DisplayCard) -> Result<Submission, AnkiError> {
        self.client.ensure_available().await?;
        let schema = schema::resolve(&self.client, self.language.note_type_hint()).await?;
        self.create_note(card, &schema).await
    }

    /// Probe the store and create the note against an already resolved `schema`.
    pub async fn submit_with_schema(
        &self,
        card: &DisplayCard,
        schema: &NoteSchema,
    ) -> Result<Submission, AnkiError> {
        self.client.ensure_available().await?;
        self.create_note(card, schema).await
    }

    /// Whether the configured deck exists.
    pub async fn deck_exists(&self) -> Result<bool, AnkiError> {
        let decks = self.client.deck_names().await?;
        Ok(decks.iter().any(|d| d == &self.deck_name))
    }

    async fn create_note(
        &self,
        card: &DisplayCard,
        schema: &NoteSchema,
    ) -> Result<Submission, AnkiError> {
        let mapping = build_field_mapping(card, schema, &self.language.rich_fields());

        let note = NewNote {
            deck_name: self.deck_name.clone(),
            model_name: schema.note_type_name.clone(),
            fields: mapping.fields,
            tags: self.language.tags(),
        };

        let note_id = self.client.add_note(&note).await?;
        info!(
            note_id,
            deck = %self.deck_name,
            note_type = %schema.note_type_name,
            layout = ?mapping.layout,
            "created note"
        );

        Ok(Submission {
            note_id,
            note_type: schema.note_type_name.clone(),
            layout: mapping.layout,
            degraded: schema.degraded,
        })
    }
}
