//! Provider identities, request/response wire shapes and the client's response type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LlmError;

/// Supported AI providers. Each one fixes a request and a response shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    /// Google Gemini `generateContent` (parts-based conversational schema).
    Gemini,
    /// OpenAI-style endpoint (model/input/max-tokens schema).
    OpenAi,
}

impl LlmProvider {
    /// Public endpoint used when no base URL is configured.
    #[must_use]
    pub fn default_base_url(self) -> &'static str {
        match self {
            Self::Gemini => "https://generativelanguage.googleapis.com/v1beta/models",
            Self::OpenAi => "https://api.openai.com/v1",
        }
    }

    /// Full request URL for `model`.
    #[must_use]
    pub fn endpoint(self, base_url: &str, model: &str) -> String {
        let base = base_url.trim_end_matches('/');
        match self {
            Self::Gemini => format!("{base}/{model}:generateContent"),
            Self::OpenAi => format!("{base}/chat/completions"),
        }
    }

    /// Decode a success body and pull out the generated text.
    ///
    /// # Errors
    /// - [`LlmError::MalformedEnvelope`] if `body` is not this provider's envelope.
    /// - [`LlmError::EmptyResponse`] if the envelope holds no non-blank text.
    pub fn extract_text(self, body: &str, model: &str) -> Result<String, LlmError> {
        let text = match self {
            Self::Gemini => {
                let response: GeminiResponse = decode_envelope(body)?;
                response
                    .candidates
                    .into_iter()
                    .next()
                    .and_then(|c| c.content.parts.into_iter().next())
                    .map(|p| p.text)
            }
            Self::OpenAi => {
                let response: OpenAiResponse = decode_envelope(body)?;
                response
                    .choices
                    .into_iter()
                    .next()
                    .map(|c| c.message.content)
            }
        };

        text.filter(|t| !t.trim().is_empty())
            .ok_or_else(|| LlmError::EmptyResponse(model.to_string()))
    }
}

fn decode_envelope<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, LlmError> {
    serde_json::from_str(body)
        .map_err(|e| LlmError::MalformedEnvelope(format!("{e} (body: {body})")))
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Gemini => "gemini",
            Self::OpenAi => "openai",
        };
        write!(f, "{name}")
    }
}

impl FromStr for LlmProvider {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "openai" => Ok(Self::OpenAi),
            other => Err(LlmError::ConfigError(format!("unknown provider: '{other}'"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Gemini wire shapes
// ---------------------------------------------------------------------------

/// `generateContent` request body.
#[derive(Debug, Clone, Serialize)]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
}

impl GeminiRequest {
    /// Single-turn request carrying `prompt`.
    #[must_use]
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeminiContent {
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeminiPart {
    #[serde(default)]
    pub text: String,
}

/// `generateContent` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiCandidate {
    #[serde(default)]
    pub content: GeminiContent,
}

// ---------------------------------------------------------------------------
// OpenAI wire shapes
// ---------------------------------------------------------------------------

/// Request body for the openai shape.
#[derive(Debug, Clone, Serialize)]
pub struct OpenAiRequest {
    pub model: String,
    pub input: String,
    pub max_tokens: u32,
}

/// Response body for the openai shape.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiResponse {
    #[serde(default)]
    pub choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiChoice {
    #[serde(default)]
    pub message: OpenAiMessage,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenAiMessage {
    #[serde(default)]
    pub content: String,
}

// ---------------------------------------------------------------------------
// Client response
// ---------------------------------------------------------------------------

/// A response from the LLM.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// The generated text.
    pub text: String,
    /// Which model produced it.
    pub model: String,
    /// Whether the primary model failed and the fallback answered.
    pub used_fallback: bool,
    /// Latency of the successful attempt in milliseconds.
    pub latency_ms: u64,
}
