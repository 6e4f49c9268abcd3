//! The per-phrase pipeline: prompt → model → parse → assemble → submit.

use std::time::Duration;

use lexicard_anki::{AnkiClient, AnkiError, NoteSubmitter, Submission};
use lexicard_core::config::LexicardConfig;
use lexicard_core::types::{DisplayCard, GenerationRequest};
use lexicard_core::{assemble, parse_response, LanguageProfile, LexicardError};
use lexicard_llm::{build_card_prompt, LlmClient, LlmError, LlmProvider};
use thiserror::Error;
use tracing::{debug, warn};

/// A failure confined to one phrase. Reported, never fatal to the session.
#[derive(Debug, Error)]
pub enum PhraseError {
    #[error("failed to query AI provider: {0}")]
    Generation(#[from] LlmError),

    #[error("failed to parse AI response: {0}")]
    Parse(#[from] LexicardError),

    #[error("failed to add note: {0}")]
    Submission(#[from] AnkiError),
}

/// Everything needed to turn one phrase into one note.
#[derive(Debug, Clone)]
pub struct Pipeline {
    llm: LlmClient,
    submitter: NoteSubmitter,
    language: LanguageProfile,
}

impl Pipeline {
    #[must_use]
    pub fn new(llm: LlmClient, submitter: NoteSubmitter, language: LanguageProfile) -> Self {
        Self {
            llm,
            submitter,
            language,
        }
    }

    /// Build the pipeline from a validated configuration.
    pub fn from_config(config: &LexicardConfig) -> Result<Self, LlmError> {
        let provider: LlmProvider = config.llm.provider.parse()?;
        let llm = LlmClient::new(
            provider,
            &config.llm.api_key,
            &config.llm.primary_model,
            &config.llm.fallback_model,
        )
        .with_base_url(&config.llm.base_url)
        .with_timeout(Duration::from_millis(config.llm.request_timeout_ms))
        .with_max_tokens(config.llm.max_tokens);

        let anki = AnkiClient::new(&config.anki.connect_url)
            .with_timeout(Duration::from_millis(config.anki.request_timeout_ms));
        let language = config.language();
        let submitter = NoteSubmitter::new(anki, &config.anki.deck_name, language.clone());

        Ok(Self::new(llm, submitter, language))
    }

    #[must_use]
    pub fn language(&self) -> &LanguageProfile {
        &self.language
    }

    #[must_use]
    pub fn llm(&self) -> &LlmClient {
        &self.llm
    }

    #[must_use]
    pub fn submitter(&self) -> &NoteSubmitter {
        &self.submitter
    }

    /// Checks run once before the session starts.
    ///
    /// An unreachable note store is fatal. A missing deck is only logged;
    /// Anki decides what `addNote` does with it.
    pub async fn startup_check(&self) -> Result<u32, AnkiError> {
        let version = self.submitter.client().ensure_available().await?;
        debug!(version, "AnkiConnect is online");

        match self.submitter.deck_exists().await {
            Ok(true) => {}
            Ok(false) => warn!(
                deck = %self.submitter.deck_name(),
                "configured deck does not exist in Anki"
            ),
            Err(e) => warn!(error = %e, "could not list decks"),
        }
        Ok(version)
    }

    /// Generate, parse and assemble a card for `request`.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<DisplayCard, PhraseError> {
        let prompt = build_card_prompt(self.language.name(), &request.phrase);
        let response = self.llm.generate(&prompt).await?;
        debug!(
            model = %response.model,
            fallback = response.used_fallback,
            latency_ms = response.latency_ms,
            "model answered"
        );

        let card = parse_response(&response.text)?;
        if card.headword.trim().is_empty() {
            warn!(phrase = %request.phrase, "model returned an empty headword");
        }
        Ok(assemble(&card))
    }

    /// File `card` into the configured deck.
    pub async fn submit(&self, card: &DisplayCard) -> Result<Submission, PhraseError> {
        Ok(self.submitter.submit(card).await?)
    }
}
