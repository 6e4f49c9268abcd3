//! LLM Client — one prompt, a primary model and exactly one fallback.

use std::time::{Duration, Instant};

use reqwest::Client;
use tracing::{debug, warn};

use crate::error::LlmError;
use crate::types::{GeminiRequest, LlmProvider, LlmResponse, OpenAiRequest};

/// Default per-attempt timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default token cap for the openai request shape.
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Generation client with a two-tier model policy.
///
/// Every call tries `primary_model`; on any failure it tries
/// `fallback_model` once. There is no further retry and no backoff.
#[derive(Debug, Clone)]
pub struct LlmClient {
    provider: LlmProvider,
    http: Client,
    base_url: String,
    api_key: String,
    primary_model: String,
    fallback_model: String,
    max_tokens: u32,
    timeout: Duration,
}

impl LlmClient {
    /// Create a client against the provider's public endpoint.
    #[must_use]
    pub fn new(
        provider: LlmProvider,
        api_key: impl Into<String>,
        primary_model: impl Into<String>,
        fallback_model: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            http: Client::new(),
            base_url: provider.default_base_url().to_string(),
            api_key: api_key.into(),
            primary_model: primary_model.into(),
            fallback_model: fallback_model.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Point the client at another base URL. Blank keeps the default.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        if !base_url.trim().is_empty() {
            self.base_url = base_url;
        }
        self
    }

    /// Set the per-attempt timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the token cap (openai shape only).
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    #[must_use]
    pub fn provider(&self) -> LlmProvider {
        self.provider
    }

    #[must_use]
    pub fn primary_model(&self) -> &str {
        &self.primary_model
    }

    #[must_use]
    pub fn fallback_model(&self) -> &str {
        &self.fallback_model
    }

    /// Generate text for `prompt`.
    ///
    /// A primary failure is logged and recovered by the fallback attempt.
    /// Only when both fail does the caller see an error, and that error
    /// carries both causes.
    pub async fn generate(&self, prompt: &str) -> Result<LlmResponse, LlmError> {
        let primary = match self.attempt(&self.primary_model, prompt).await {
            Ok(response) => return Ok(response),
            Err(e) => e,
        };

        warn!(
            model = %self.primary_model,
            fallback = %self.fallback_model,
            error = %primary,
            "primary model request failed, retrying with fallback model"
        );

        match self.attempt(&self.fallback_model, prompt).await {
            Ok(mut response) => {
                response.used_fallback = true;
                Ok(response)
            }
            Err(fallback) => Err(LlmError::BothModelsFailed {
                primary_model: self.primary_model.clone(),
                primary: Box::new(primary),
                fallback_model: self.fallback_model.clone(),
                fallback: Box::new(fallback),
            }),
        }
    }

    /// One bounded request against `model`.
    async fn attempt(&self, model: &str, prompt: &str) -> Result<LlmResponse, LlmError> {
        let url = self.provider.endpoint(&self.base_url, model);
        debug!(provider = %self.provider, %model, "sending generation request");

        let request = match self.provider {
            LlmProvider::Gemini => self
                .http
                .post(&url)
                .header("X-Goog-Api-Key", &self.api_key)
                .json(&GeminiRequest::from_prompt(prompt)),
            LlmProvider::OpenAi => self
                .http
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(&OpenAiRequest {
                    model: model.to_string(),
                    input: prompt.to_string(),
                    max_tokens: self.max_tokens,
                }),
        };

        let start = Instant::now();
        let resp = request
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.classify(e))?;
        let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        if !status.is_success() {
            return Err(LlmError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let text = self.provider.extract_text(&body, model)?;
        debug!(%model, latency_ms, "generation request succeeded");

        Ok(LlmResponse {
            text,
            model: model.to_string(),
            used_fallback: false,
            latency_ms,
        })
    }

    fn classify(&self, err: reqwest::Error) -> LlmError {
        if err.is_timeout() {
            LlmError::Timeout(u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX))
        } else {
            LlmError::from(err)
        }
    }
}
