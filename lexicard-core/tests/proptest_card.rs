//! Property-Based Tests for the parse → assemble pipeline.
//!
//! Uses `proptest` to check that the parser never decodes text without a
//! brace pair and that assembly is a pure, separator-clean transform.

use proptest::prelude::*;

use lexicard_core::assembler::{assemble, LINE_BREAK};
use lexicard_core::error::LexicardError;
use lexicard_core::parser::parse_response;
use lexicard_core::types::GeneratedCard;

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

fn arb_entry() -> impl Strategy<Value = String> {
    "[a-zA-ZäöåÄÖÅ .,!?-]{0,24}"
}

fn arb_card() -> impl Strategy<Value = GeneratedCard> {
    (
        arb_entry(),
        prop::collection::vec(arb_entry(), 0..5),
        prop::collection::vec(arb_entry(), 0..5),
        prop::collection::vec(arb_entry(), 0..5),
    )
        .prop_map(|(headword, translations, examples, notes)| GeneratedCard {
            headword,
            translations,
            examples,
            notes,
        })
}

// ---------------------------------------------------------------------------
// Property: text without a brace pair never decodes
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn text_without_braces_is_no_payload(text in "[^{}]*") {
        let result = parse_response(&text);
        prop_assert!(matches!(result, Err(LexicardError::NoStructuredPayload)));
    }

    #[test]
    fn text_with_only_closing_brace_is_no_payload(prefix in "[^{}]*", suffix in "[^{}]*") {
        let text = format!("{prefix}}}{suffix}");
        let result = parse_response(&text);
        prop_assert!(matches!(result, Err(LexicardError::NoStructuredPayload)));
    }
}

// ---------------------------------------------------------------------------
// Property: commentary around a serialized card does not change the result
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn commentary_is_stripped(card in arb_card(), prefix in "[^{}]{0,40}", suffix in "[^{}]{0,40}") {
        let json = serde_json::to_string(&card).expect("card serializes");
        let raw = format!("{prefix}{json}{suffix}");
        let parsed = parse_response(&raw).expect("wrapped payload parses");
        prop_assert_eq!(parsed, card);
    }
}

// ---------------------------------------------------------------------------
// Property: assembly is pure and separator-clean
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn assemble_is_deterministic(card in arb_card()) {
        prop_assert_eq!(assemble(&card), assemble(&card));
    }

    #[test]
    fn empty_translations_give_empty_block(mut card in arb_card()) {
        card.translations.clear();
        prop_assert_eq!(assemble(&card).translation_block, "");
    }

    #[test]
    fn translation_block_has_one_bullet_per_entry(card in arb_card()) {
        let block = assemble(&card).translation_block;
        if card.translations.is_empty() {
            prop_assert!(block.is_empty());
        } else {
            let entries: Vec<&str> = block.split(LINE_BREAK).collect();
            prop_assert_eq!(entries.len(), card.translations.len());
            for (entry, original) in entries.iter().zip(&card.translations) {
                prop_assert_eq!(*entry, format!("- {}", original.to_lowercase()));
            }
        }
    }
}
