//! # lexicard-llm — AI Provider Client for lexicard
//!
//! Provides a single `generate` call over two provider shapes:
//!   - **Gemini** `generateContent` (candidates → content → parts → text)
//!   - **OpenAI-style** endpoint (choices → message → content)
//!
//! Every call follows a fixed two-tier policy:
//!
//! ```text
//! primary model ──fail──▶ fallback model ──fail──▶ BothModelsFailed
//!       │                        │
//!       └──ok──▶ text            └──ok──▶ text (primary error logged only)
//! ```
//!
//! Each attempt is bounded by its own timeout. There is no backoff and no
//! third tier.

pub mod client;
pub mod error;
pub mod prompt;
pub mod types;

pub use client::LlmClient;
pub use error::LlmError;
pub use prompt::build_card_prompt;
pub use types::{LlmProvider, LlmResponse};
