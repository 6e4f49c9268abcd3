//! Field mapping: which card text goes into which note field.

use std::collections::BTreeMap;

use lexicard_core::language::RichFields;
use lexicard_core::types::DisplayCard;

use crate::schema::{NoteSchema, DEFAULT_FIELDS};

/// How the card was laid out onto the note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingLayout {
    /// One card attribute per language-specific field.
    Rich,
    /// Headword on the first field, everything else composed onto the second.
    Generic,
}

/// Field name → field content for one note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    pub layout: MappingLayout,
    pub fields: BTreeMap<String, String>,
}

/// Map `card` onto `schema`.
///
/// The rich layout is used only when the schema has every rich field.
/// Otherwise the first two schema fields (or Front/Back when the schema
/// has fewer than two) get the generic layout.
#[must_use]
pub fn build_field_mapping(
    card: &DisplayCard,
    schema: &NoteSchema,
    rich: &RichFields,
) -> FieldMapping {
    if schema.contains_all(&rich.names()) {
        let fields = BTreeMap::from([
            (rich.headword.clone(), card.primary_text.clone()),
            (rich.translation.clone(), card.translation_block.clone()),
            (rich.example.clone(), card.example_block.clone()),
            (rich.notes.clone(), card.notes_block.clone()),
        ]);
        return FieldMapping {
            layout: MappingLayout::Rich,
            fields,
        };
    }

    let (front, back) = match schema.field_names.as_slice() {
        [first, second, ..] => (first.clone(), second.clone()),
        _ => (DEFAULT_FIELDS[0].to_string(), DEFAULT_FIELDS[1].to_string()),
    };

    FieldMapping {
        layout: MappingLayout::Generic,
        fields: BTreeMap::from([
            (front, card.primary_text.clone()),
            (back, compose_back(card)),
        ]),
    }
}

/// Translation, examples and notes as one block with labelled sections.
#[must_use]
pub fn compose_back(card: &DisplayCard) -> String {
    format!(
        "**Translation:** {}\n\n**Examples:**\n{}\n\n**Notes:**\n{}",
        card.translation_block, card.example_block, card.notes_block
    )
}
