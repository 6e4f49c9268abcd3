//! Core card types shared across the pipeline.

use serde::{Deserialize, Serialize};

/// A single user request: the word or phrase to build a card for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// The phrase as typed by the user, already trimmed.
    pub phrase: String,
}

impl GenerationRequest {
    /// Create a request for `phrase`.
    #[must_use]
    pub fn new(phrase: impl Into<String>) -> Self {
        Self {
            phrase: phrase.into(),
        }
    }
}

/// Structured card data decoded from model output.
///
/// Every field defaults to empty so partial output still decodes. The
/// headword travels under the `phrase` key on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratedCard {
    /// Dictionary form of the word or phrase. May be empty.
    #[serde(rename = "phrase")]
    pub headword: String,
    /// Translations, most common first.
    pub translations: Vec<String>,
    /// Example sentences in the target language.
    pub examples: Vec<String>,
    /// Free-form notes (synonyms, etymology, grammar).
    pub notes: Vec<String>,
}

/// Presentation-ready card derived from a [`GeneratedCard`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayCard {
    /// The headword, unchanged.
    pub primary_text: String,
    /// Bullet list of lower-cased translations.
    pub translation_block: String,
    /// Examples joined with the line-break marker.
    pub example_block: String,
    /// Notes joined with the line-break marker.
    pub notes_block: String,
}
