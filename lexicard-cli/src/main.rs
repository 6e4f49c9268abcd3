use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;

use lexicard_cli::logging::init_tracing;
use lexicard_cli::shutdown::spawn_signal_listener;
use lexicard_cli::{Pipeline, Session, SessionOutcome};
use lexicard_core::config::LexicardConfig;

/// Turn foreign-language words into Anki flashcards.
#[derive(Debug, Parser)]
#[command(name = "lexicard", version, about)]
struct Cli {
    /// Path to the config file (default: ./lexicard.toml, then the user config dir).
    #[arg(short, long, env = "LEXICARD_CONFIG")]
    config: Option<PathBuf>,

    /// Log level when RUST_LOG is unset (overrides general.log_level).
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("error: failed to start async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = runtime.block_on(run(cli));
    // A pending stdin read lives on a blocking thread; don't wait for it.
    runtime.shutdown_background();

    match result {
        Ok(SessionOutcome::Terminated | SessionOutcome::Cancelled) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<SessionOutcome> {
    let (config, path) =
        LexicardConfig::load(cli.config.as_deref()).context("failed to load configuration")?;

    init_tracing(cli.log_level.as_deref().unwrap_or(&config.general.log_level));
    tracing::debug!(path = %path.display(), "configuration loaded");

    let pipeline = Pipeline::from_config(&config).context("invalid AI provider configuration")?;
    pipeline
        .startup_check()
        .await
        .context("note store is not reachable")?;

    let cancel = CancellationToken::new();
    let _listener = spawn_signal_listener(
        cancel.clone(),
        Duration::from_millis(config.session.shutdown_grace_ms),
    );

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut session = Session::new(pipeline, std::io::stdout(), cancel);
    session.greet()?;
    Ok(session.run(stdin).await?)
}
