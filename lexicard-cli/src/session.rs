//! Interactive session loop.
//!
//! ```text
//!            ┌──────────── failure / success ────────────┐
//!            ▼                                            │
//!   AwaitingInput ──phrase──▶ Generating ──card──▶ Submitting
//!       │    ▲ blank
//!       │    └──┘
//!       └──exit token / EOF──▶ Terminated
//!
//!   any state ──cancellation──▶ Cancelled
//! ```
//!
//! One phrase is processed end to end before the next line is read.
//! Reading input is the only unbounded wait; it runs as a spawned task so
//! cancellation can interrupt it.

use std::io::{self, Write};

use lexicard_core::types::GenerationRequest;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::pipeline::Pipeline;

/// Lines that end the session.
pub const EXIT_TOKENS: &[&str] = &["q", "quit", "exit"];

/// Where the loop currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for the next line.
    AwaitingInput,
    /// Asking the model for a card.
    Generating,
    /// Filing the card into Anki.
    Submitting,
    Cancelled,
    Terminated,
}

/// How the session ended. Both are clean exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Exit token or end of input.
    Terminated,
    /// A cancellation signal arrived.
    Cancelled,
}

/// What a line of input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// An exit token.
    Exit,
    /// Nothing but whitespace.
    Blank,
    /// A trimmed phrase to build a card for.
    Phrase(String),
}

/// Classify one raw input line.
#[must_use]
pub fn classify_input(line: &str) -> Input {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        Input::Blank
    } else if EXIT_TOKENS.iter().any(|t| trimmed.eq_ignore_ascii_case(t)) {
        Input::Exit
    } else {
        Input::Phrase(trimmed.to_string())
    }
}

/// Read one line, handing the reader back so the next read can reuse it.
/// `None` means end of input. Invalid UTF-8 is replaced, never an error.
async fn read_line<R>(mut reader: R) -> (R, io::Result<Option<String>>)
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let result = reader
        .read_until(b'\n', &mut buf)
        .await
        .map(|n| (n > 0).then(|| String::from_utf8_lossy(&buf).into_owned()));
    (reader, result)
}

/// Interactive loop over one input stream, writing prompts and results to `out`.
pub struct Session<W: Write> {
    pipeline: Pipeline,
    out: W,
    cancel: CancellationToken,
    state: SessionState,
    cards_added: usize,
}

impl<W: Write> Session<W> {
    /// A session in `AwaitingInput` with no cards added.
    pub fn new(pipeline: Pipeline, out: W, cancel: CancellationToken) -> Self {
        Self {
            pipeline,
            out,
            cancel,
            state: SessionState::AwaitingInput,
            cards_added: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Notes created so far.
    #[must_use]
    pub fn cards_added(&self) -> usize {
        self.cards_added
    }

    /// Print the banner shown before the first prompt.
    pub fn greet(&mut self) -> io::Result<()> {
        let language = self.pipeline.language().name().to_string();
        let llm = self.pipeline.llm();
        writeln!(self.out, "{language} Anki Card Builder")?;
        writeln!(
            self.out,
            "Using AI provider: {} ({}, fallback {})",
            llm.provider(),
            llm.primary_model(),
            llm.fallback_model()
        )?;
        writeln!(self.out, "Deck: {}", self.pipeline.submitter().deck_name())?;
        writeln!(
            self.out,
            "Enter {language} words or phrases (to exit use Ctrl+C or type 'q', 'quit' or 'exit'):"
        )
    }

    /// Run until an exit token, end of input or cancellation.
    ///
    /// Only I/O errors on the input or output stream end the session with
    /// an error; per-phrase failures are reported and the loop continues.
    pub async fn run<R>(&mut self, reader: R) -> io::Result<SessionOutcome>
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let cancel = self.cancel.clone();
        let mut reader = reader;

        loop {
            self.enter(SessionState::AwaitingInput);
            write!(self.out, "> ")?;
            self.out.flush()?;

            let mut pending = tokio::spawn(read_line(reader));
            let line = tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    pending.abort();
                    return self.cancelled();
                }
                joined = &mut pending => {
                    let (returned, line) = joined.map_err(io::Error::other)?;
                    reader = returned;
                    line?
                }
            };

            let phrase = match line.as_deref().map_or(Input::Exit, classify_input) {
                Input::Exit => return self.terminated(),
                Input::Blank => continue,
                Input::Phrase(phrase) => phrase,
            };

            if !self.process(GenerationRequest::new(phrase)).await? {
                return self.cancelled();
            }
        }
    }

    /// Drive one phrase through generation and submission.
    /// Returns `false` when cancellation interrupted the work.
    async fn process(&mut self, request: GenerationRequest) -> io::Result<bool> {
        let cancel = self.cancel.clone();
        writeln!(self.out, "Processing: {}", request.phrase)?;

        self.enter(SessionState::Generating);
        let generated = tokio::select! {
            biased;
            () = cancel.cancelled() => return Ok(false),
            result = self.pipeline.generate(&request) => result,
        };
        let card = match generated {
            Ok(card) => card,
            Err(e) => {
                debug!(error = ?e, "generation failed");
                writeln!(self.out, "Error generating card: {e}")?;
                return Ok(true);
            }
        };

        self.enter(SessionState::Submitting);
        let submitted = tokio::select! {
            biased;
            () = cancel.cancelled() => return Ok(false),
            result = self.pipeline.submit(&card) => result,
        };
        match submitted {
            Ok(submission) => {
                self.cards_added += 1;
                if submission.degraded {
                    writeln!(self.out, "(note type fields unavailable, used Front/Back layout)")?;
                }
                writeln!(self.out, "✅ Successfully added card for '{}'\n", request.phrase)?;
            }
            Err(e) => {
                debug!(error = ?e, "submission failed");
                writeln!(self.out, "Error adding card to Anki: {e}")?;
            }
        }
        Ok(true)
    }

    fn enter(&mut self, next: SessionState) {
        debug!(from = ?self.state, to = ?next, "session state change");
        self.state = next;
    }

    fn cancelled(&mut self) -> io::Result<SessionOutcome> {
        self.enter(SessionState::Cancelled);
        info!(cards_added = self.cards_added, "session cancelled");
        writeln!(self.out, "\nOperation cancelled. Shutting down...")?;
        Ok(SessionOutcome::Cancelled)
    }

    fn terminated(&mut self) -> io::Result<SessionOutcome> {
        self.enter(SessionState::Terminated);
        info!(cards_added = self.cards_added, "session ended");
        writeln!(self.out, "Goodbye!")?;
        Ok(SessionOutcome::Terminated)
    }
}
