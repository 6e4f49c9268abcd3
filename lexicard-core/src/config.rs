//! Configuration for lexicard.
//!
//! Maps directly to `lexicard.toml`:
//!
//! ```toml
//! [general]
//! language = "Finnish"
//!
//! [llm]
//! provider = "gemini"
//! api_key = "..."
//!
//! [anki]
//! deck_name = "Finnish::Vocabulary"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LexicardError, Result};
use crate::language::LanguageProfile;

/// Config file name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "lexicard.toml";

/// Environment variable that overrides `llm.api_key`.
pub const API_KEY_ENV: &str = "LEXICARD_API_KEY";

/// Provider names understood by the LLM client.
pub const KNOWN_PROVIDERS: &[&str] = &["gemini", "openai"];

/// Top-level lexicard configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexicardConfig {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// AI provider settings.
    #[serde(default)]
    pub llm: LlmConfig,
    /// Note-store (AnkiConnect) settings.
    #[serde(default)]
    pub anki: AnkiConfig,
    /// Interactive session settings.
    #[serde(default)]
    pub session: SessionConfig,
}

impl LexicardConfig {
    /// Load configuration from a TOML string. Does not validate.
    ///
    /// # Errors
    /// Returns `LexicardError::Config` if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| LexicardError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file. Does not validate.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
            .map_err(|e| LexicardError::Config(format!("{}: {e}", path.display())))
    }

    /// Locate, read, override and validate the configuration.
    ///
    /// With `explicit` set, only that file is tried. Otherwise the first
    /// existing file from [`search_paths`] wins. `LEXICARD_API_KEY`
    /// overrides the file's API key when set.
    ///
    /// # Errors
    /// Returns `LexicardError::Config` when no file exists or the result
    /// fails validation, and `LexicardError::Io` when a file exists but
    /// cannot be read.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, PathBuf)> {
        let candidates = match explicit {
            Some(path) => vec![path.to_path_buf()],
            None => search_paths(),
        };

        let path = candidates.iter().find(|p| p.is_file()).cloned().ok_or_else(|| {
            let listed = candidates
                .iter()
                .map(|p| format!("  {}", p.display()))
                .collect::<Vec<_>>()
                .join("\n");
            LexicardError::Config(format!("no config file found in paths:\n{listed}"))
        })?;

        debug!(path = %path.display(), "loading configuration");
        let mut config = Self::from_file(&path)?;
        config.apply_api_key_override(std::env::var(API_KEY_ENV).ok());
        config.validate()?;
        Ok((config, path))
    }

    /// Replace the API key with `key` when it is present and non-blank.
    pub fn apply_api_key_override(&mut self, key: Option<String>) {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.llm.api_key = key;
        }
    }

    /// Check the fields the pipeline cannot run without.
    ///
    /// # Errors
    /// Returns `LexicardError::Config` naming the first invalid value.
    pub fn validate(&self) -> Result<()> {
        if self.anki.deck_name.trim().is_empty() {
            return Err(LexicardError::Config("anki.deck_name is required".into()));
        }
        if self.anki.connect_url.trim().is_empty() {
            return Err(LexicardError::Config("anki.connect_url is required".into()));
        }
        if self.llm.api_key.trim().is_empty() {
            return Err(LexicardError::Config(format!(
                "llm.api_key is required (or set {API_KEY_ENV})"
            )));
        }
        if !KNOWN_PROVIDERS.contains(&self.llm.provider.as_str()) {
            return Err(LexicardError::Config(format!(
                "unknown llm.provider '{}' (expected one of: {})",
                self.llm.provider,
                KNOWN_PROVIDERS.join(", ")
            )));
        }
        if self.llm.primary_model == self.llm.fallback_model {
            return Err(LexicardError::Config(
                "llm.primary_model and llm.fallback_model must differ".into(),
            ));
        }
        if self.general.language.trim().is_empty() {
            return Err(LexicardError::Config("general.language must not be empty".into()));
        }
        Ok(())
    }

    /// Language profile for the configured language.
    #[must_use]
    pub fn language(&self) -> LanguageProfile {
        LanguageProfile::new(&self.general.language)
    }
}

/// Candidate config locations, in lookup order.
#[must_use]
pub fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("lexicard").join("config.toml"));
    }
    paths
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level when `RUST_LOG` is unset: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Target language of the cards, e.g. "Finnish".
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            language: default_language(),
        }
    }
}

/// AI provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Provider: "gemini" or "openai".
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Provider credential.
    #[serde(default)]
    pub api_key: String,
    /// Base URL override; empty means the provider's public endpoint.
    #[serde(default)]
    pub base_url: String,
    /// Model tried first.
    #[serde(default = "default_primary_model")]
    pub primary_model: String,
    /// Model tried once when the primary fails.
    #[serde(default = "default_fallback_model")]
    pub fallback_model: String,
    /// Per-attempt timeout in milliseconds.
    #[serde(default = "default_30000")]
    pub request_timeout_ms: u64,
    /// Token cap sent with the openai request shape.
    #[serde(default = "default_1000")]
    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_key: String::new(),
            base_url: String::new(),
            primary_model: default_primary_model(),
            fallback_model: default_fallback_model(),
            request_timeout_ms: 30_000,
            max_tokens: 1000,
        }
    }
}

/// AnkiConnect settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnkiConfig {
    /// Deck that receives new notes.
    #[serde(default)]
    pub deck_name: String,
    /// AnkiConnect endpoint.
    #[serde(default = "default_connect_url")]
    pub connect_url: String,
    /// Timeout for every AnkiConnect call in milliseconds.
    #[serde(default = "default_5000")]
    pub request_timeout_ms: u64,
}

impl Default for AnkiConfig {
    fn default() -> Self {
        Self {
            deck_name: String::new(),
            connect_url: default_connect_url(),
            request_timeout_ms: 5000,
        }
    }
}

/// Interactive session settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// How long in-flight work may run after a shutdown signal before the
    /// process is force-terminated, in milliseconds.
    #[serde(default = "default_5000")]
    pub shutdown_grace_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            shutdown_grace_ms: 5000,
        }
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_log_level() -> String { "warn".to_string() }
fn default_language() -> String { "Finnish".to_string() }
fn default_provider() -> String { "gemini".to_string() }
fn default_primary_model() -> String { "gemini-2.5-flash".to_string() }
fn default_fallback_model() -> String { "gemini-2.0-flash".to_string() }
fn default_connect_url() -> String { "http://localhost:8765".to_string() }
fn default_1000() -> u32 { 1000 }
fn default_5000() -> u64 { 5000 }
fn default_30000() -> u64 { 30_000 }

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[llm]
api_key = "secret"

[anki]
deck_name = "Finnish"
"#;

    #[test]
    fn minimal_config_fills_defaults() {
        let config = LexicardConfig::from_toml(MINIMAL).expect("should parse");
        assert_eq!(config.general.language, "Finnish");
        assert_eq!(config.llm.provider, "gemini");
        assert_eq!(config.llm.request_timeout_ms, 30_000);
        assert_eq!(config.anki.connect_url, "http://localhost:8765");
        assert_eq!(config.session.shutdown_grace_ms, 5000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_config_fails_validation() {
        let config = LexicardConfig::from_toml("").expect("empty TOML parses");
        let err = config.validate().expect_err("deck name missing");
        assert!(err.to_string().contains("deck_name"));
    }

    #[test]
    fn missing_api_key_fails_validation() {
        let config = LexicardConfig::from_toml("[anki]\ndeck_name = \"d\"").expect("parses");
        let err = config.validate().expect_err("api key missing");
        assert!(err.to_string().contains("api_key"));
    }

    #[test]
    fn unknown_provider_rejected() {
        let mut config = LexicardConfig::from_toml(MINIMAL).expect("parses");
        config.llm.provider = "mystery".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn identical_models_rejected() {
        let mut config = LexicardConfig::from_toml(MINIMAL).expect("parses");
        config.llm.fallback_model = config.llm.primary_model.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn api_key_override_ignores_blank() {
        let mut config = LexicardConfig::from_toml(MINIMAL).expect("parses");
        config.apply_api_key_override(Some("   ".into()));
        assert_eq!(config.llm.api_key, "secret");
        config.apply_api_key_override(Some("from-env".into()));
        assert_eq!(config.llm.api_key, "from-env");
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = LexicardConfig::from_toml("[llm\napi_key=").expect_err("invalid");
        assert!(matches!(err, LexicardError::Config(_)));
    }
}
