//! AnkiConnect client — typed wrappers around the JSON-RPC style endpoint.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::AnkiError;
use crate::types::{
    Action, AddNoteParams, AnkiRequest, AnkiResponse, ModelFieldNamesParams, NewNote, NoParams,
    NoteId,
};

/// Default timeout for every AnkiConnect call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to one AnkiConnect endpoint.
#[derive(Debug, Clone)]
pub struct AnkiClient {
    http: Client,
    url: String,
    timeout: Duration,
}

impl AnkiClient {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            url: url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send one action. A non-null `error` fails the call whatever the HTTP status.
    async fn invoke<P: Serialize>(
        &self,
        action: Action,
        params: &P,
    ) -> Result<Option<serde_json::Value>, AnkiError> {
        debug!(%action, url = %self.url, "AnkiConnect request");

        let resp = self
            .http
            .post(&self.url)
            .json(&AnkiRequest::new(action, params))
            .timeout(self.timeout)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        // AnkiConnect reports failures in the envelope; check it before the status.
        let envelope: Option<AnkiResponse> = serde_json::from_str(&body).ok();
        if let Some(error) = envelope.as_ref().and_then(|e| e.error.as_ref()) {
            return Err(AnkiError::Rpc {
                action: action.to_string(),
                message: error.as_str().map_or_else(|| error.to_string(), str::to_string),
            });
        }

        if !status.is_success() {
            return Err(AnkiError::Status(status.as_u16()));
        }

        let envelope = envelope.ok_or_else(|| AnkiError::Decode {
            action: action.to_string(),
            reason: format!("not an AnkiConnect envelope: {body}"),
        })?;

        Ok(envelope.result.filter(|v| !v.is_null()))
    }

    /// Send one action whose `result` must be present and of type `T`.
    async fn invoke_for<P: Serialize, T: DeserializeOwned>(
        &self,
        action: Action,
        params: &P,
    ) -> Result<T, AnkiError> {
        let result = self.invoke(action, params).await?.ok_or_else(|| AnkiError::Decode {
            action: action.to_string(),
            reason: "missing result".into(),
        })?;

        serde_json::from_value(result).map_err(|e| AnkiError::Decode {
            action: action.to_string(),
            reason: e.to_string(),
        })
    }

    /// AnkiConnect API version.
    pub async fn version(&self) -> Result<u32, AnkiError> {
        self.invoke_for(Action::Version, &NoParams {}).await
    }

    /// Availability probe. Any failure is reported as [`AnkiError::Unreachable`].
    pub async fn ensure_available(&self) -> Result<u32, AnkiError> {
        self.version().await.map_err(|e| AnkiError::Unreachable {
            url: self.url.clone(),
            reason: e.to_string(),
        })
    }

    pub async fn deck_names(&self) -> Result<Vec<String>, AnkiError> {
        self.invoke_for(Action::DeckNames, &NoParams {}).await
    }

    /// Note type ("model") names.
    pub async fn model_names(&self) -> Result<Vec<String>, AnkiError> {
        self.invoke_for(Action::ModelNames, &NoParams {}).await
    }

    /// Field names of note type `model_name`, in the note type's order.
    pub async fn model_field_names(&self, model_name: &str) -> Result<Vec<String>, AnkiError> {
        self.invoke_for(Action::ModelFieldNames, &ModelFieldNamesParams { model_name })
            .await
    }

    /// Create `note` and return its id.
    pub async fn add_note(&self, note: &NewNote) -> Result<NoteId, AnkiError> {
        self.invoke_for(Action::AddNote, &AddNoteParams { note }).await
    }
}
