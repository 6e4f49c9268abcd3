//! Prompt templates for card generation.
//!
//! The template asks for a bare JSON object. Models still wrap it in prose
//! now and then, which is why the parser in `lexicard-core` is tolerant.

/// Card generation prompt. Placeholders: `{language}`, `{phrase}`.
pub const CARD_PROMPT: &str = r#"You are a {language} language expert helping to create Anki flashcards for language learners.

For the {language} word/phrase: "{phrase}"

Please provide a JSON response with the following structure:
{
  "phrase": "the original {language} word/phrase in dictionary form, lowercase",
  "translations": ["translation1", "translation2", ...],
  "examples": [
    "Example sentence 1 in {language}",
    "Example sentence 2 in {language}",
    "Example sentence 3 in {language}",
    "Example sentence 4 in {language}"
  ],
  "notes": [
    "synonyms: abc, def...",
    "etymology: short info on word origin",
    "extra: grammatical information, usage quirks, and any other useful information for language learners"
  ]
}

Guidelines:
- Provide all relevant translations (most common meanings)
- Create 3-4 example sentences at B1-B2 level, try to include examples for different translations of the word/phrase
- Make examples natural and contextually rich
- Use the word in different grammatical cases/forms when possible
- Include etymology, synonyms, grammatical notes, and usage tips in the notes section, but don't add obvious information - keep it concise.
- Use lowercase for notes
- Add colloquial (spoken-language) variants of the word to synonyms if applicable
- Try not to skip etymology if available
- Keep the prefixes of the notes consistent (e.g. always use "synonyms:", "etymology:", "extra:")
- Ensure JSON is properly formatted

Respond ONLY with the JSON, no additional text."#;

/// Simple template interpolation for prompts.
///
/// Replaces `{key}` with the corresponding value.
#[must_use]
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{key}}}"), value);
    }
    result
}

/// Render [`CARD_PROMPT`] for `phrase` in `language`.
#[must_use]
pub fn build_card_prompt(language: &str, phrase: &str) -> String {
    render_template(CARD_PROMPT, &[("language", language), ("phrase", phrase)])
}
