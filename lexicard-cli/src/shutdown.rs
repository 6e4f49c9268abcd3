//! Signal handling with a bounded grace period.
//!
//! On the first Ctrl-C (or SIGTERM) the shared token is cancelled so the
//! session stops starting work. If the process is still alive after the
//! grace period, it is force-terminated.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Exit code used when the grace period runs out.
pub const FORCED_EXIT_CODE: i32 = 1;

/// Cancel `cancel` once `signal` resolves, then call `force_exit` after `grace`.
///
/// Dropping or aborting the returned future before the grace period ends
/// disarms the watchdog.
pub async fn watch<S, E>(signal: S, cancel: CancellationToken, grace: Duration, force_exit: E)
where
    S: Future<Output = &'static str>,
    E: FnOnce(i32),
{
    let name = signal.await;
    info!(signal = name, grace = ?grace, "shutdown signal received");
    cancel.cancel();

    tokio::time::sleep(grace).await;
    warn!(grace = ?grace, "grace period elapsed, forcing exit");
    force_exit(FORCED_EXIT_CODE);
}

/// Spawn the process-wide listener for Ctrl-C / SIGTERM.
pub fn spawn_signal_listener(cancel: CancellationToken, grace: Duration) -> JoinHandle<()> {
    tokio::spawn(watch(wait_for_signal(), cancel, grace, move |code| {
        eprintln!("Slept for {}ms, force exit triggered", grace.as_millis());
        std::process::exit(code);
    }))
}

/// Resolve on the first interrupt or terminate signal.
async fn wait_for_signal() -> &'static str {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => tokio::select! {
                () = ctrl_c() => "SIGINT",
                _ = term.recv() => "SIGTERM",
            },
            Err(e) => {
                warn!(error = %e, "could not install SIGTERM handler");
                ctrl_c().await;
                "SIGINT"
            }
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c().await;
        "Ctrl-C"
    }
}

/// Ctrl-C, or never if the handler cannot be installed.
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "could not install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
}
