//! Tolerant extraction of card data from free-form model output.
//!
//! Models wrap their JSON in prose, markdown fences or apologies. The parser
//! takes everything from the first `{` to the last `}` of the trimmed text
//! and decodes that span, ignoring unknown keys and defaulting missing ones.
//! It is a best-effort extractor, not a validator.

use crate::error::{LexicardError, Result};
use crate::types::GeneratedCard;

/// Locate the structured payload inside `raw`.
///
/// Returns the substring spanning the first `{` through the last `}`, or
/// `None` when either delimiter is missing or they are out of order.
#[must_use]
pub fn extract_payload(raw: &str) -> Option<&str> {
    let text = raw.trim();
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Parse raw model output into a [`GeneratedCard`].
///
/// # Errors
/// - [`LexicardError::NoStructuredPayload`] if no `{ ... }` span exists.
/// - [`LexicardError::PayloadDecode`] if the span is not a decodable card.
pub fn parse_response(raw: &str) -> Result<GeneratedCard> {
    let payload = extract_payload(raw).ok_or(LexicardError::NoStructuredPayload)?;

    serde_json::from_str(payload).map_err(|e| LexicardError::PayloadDecode {
        payload: payload.to_string(),
        reason: e.to_string(),
    })
}
