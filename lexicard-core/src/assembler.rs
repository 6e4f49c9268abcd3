//! Turns a [`GeneratedCard`] into a [`DisplayCard`].
//!
//! Pure and deterministic: the same input always yields the same output.

use crate::types::{DisplayCard, GeneratedCard};

/// Marker placed before every translation.
pub const BULLET: &str = "- ";

/// Separator between entries. Anki renders fields as HTML.
pub const LINE_BREAK: &str = "<br>";

/// Assemble the display form of a card.
#[must_use]
pub fn assemble(card: &GeneratedCard) -> DisplayCard {
    let translation_block = card
        .translations
        .iter()
        .map(|t| format!("{BULLET}{}", t.to_lowercase()))
        .collect::<Vec<_>>()
        .join(LINE_BREAK);

    DisplayCard {
        primary_text: card.headword.clone(),
        translation_block,
        example_block: card.examples.join(LINE_BREAK),
        notes_block: card.notes.join(LINE_BREAK),
    }
}
