//! # lexicard-cli — Interactive Card Builder
//!
//! Wires the library crates into the `lexicard` binary:
//!
//! - `pipeline` — phrase → prompt → model → card → note
//! - `session` — the read/generate/submit loop under cancellation
//! - `shutdown` — signal listener with grace-period watchdog
//! - `logging` — tracing subscriber setup

pub mod logging;
pub mod pipeline;
pub mod session;
pub mod shutdown;

pub use pipeline::{PhraseError, Pipeline};
pub use session::{Session, SessionOutcome, SessionState};
