//! Target-language profile.
//!
//! Everything language-specific in the pipeline (note-type hint, rich field
//! names, tags) is derived from the configured language name.

/// Tag attached to every note created by lexicard.
pub const AUTOMATION_TAG: &str = "auto-generated";

/// Field name for translations in the rich note layout.
pub const TRANSLATION_FIELD: &str = "Translation";

/// Field name for notes in the rich note layout.
pub const NOTES_FIELD: &str = "Notes";

/// Names of the four fields a language-specific note type is expected to have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RichFields {
    /// Receives the headword, e.g. `Finnish`.
    pub headword: String,
    /// Receives the translation block.
    pub translation: String,
    /// Receives the example block, e.g. `Finnish Example`.
    pub example: String,
    /// Receives the notes block.
    pub notes: String,
}

impl RichFields {
    /// All four names, in layout order.
    #[must_use]
    pub fn names(&self) -> [&str; 4] {
        [
            self.headword.as_str(),
            self.translation.as_str(),
            self.example.as_str(),
            self.notes.as_str(),
        ]
    }
}

/// Language-specific settings derived from a language name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageProfile {
    name: String,
}

impl LanguageProfile {
    /// Build a profile for `name` (e.g. `"Finnish"`).
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
        }
    }

    /// Display name of the language.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Substring used to pick a note type, matched case-insensitively.
    #[must_use]
    pub fn note_type_hint(&self) -> &str {
        &self.name
    }

    /// Field names of the language-specific note layout.
    #[must_use]
    pub fn rich_fields(&self) -> RichFields {
        RichFields {
            headword: self.name.clone(),
            translation: TRANSLATION_FIELD.to_string(),
            example: format!("{} Example", self.name),
            notes: NOTES_FIELD.to_string(),
        }
    }

    /// Lower-cased language tag, e.g. `finnish`.
    #[must_use]
    pub fn tag(&self) -> String {
        self.name.to_lowercase()
    }

    /// Tags attached to every created note: the automation marker and the language marker.
    #[must_use]
    pub fn tags(&self) -> Vec<String> {
        vec![AUTOMATION_TAG.to_string(), self.tag()]
    }
}

impl Default for LanguageProfile {
    fn default() -> Self {
        Self::new("Finnish")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finnish_rich_fields() {
        let profile = LanguageProfile::default();
        assert_eq!(
            profile.rich_fields().names(),
            ["Finnish", "Translation", "Finnish Example", "Notes"]
        );
    }

    #[test]
    fn tags_are_automation_and_language() {
        let profile = LanguageProfile::new(" Swedish ");
        assert_eq!(profile.name(), "Swedish");
        assert_eq!(profile.tags(), vec!["auto-generated", "swedish"]);
    }
}
