//! Stops the server gracefully on Ctrl+C or a termination signal.

use std::{io, time::Duration};

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;
use tracing::info;

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("failed to install {signal} handler: {source}")]
    Install {
        signal: &'static str,
        #[source]
        source: io::Error,
    },
}

/// Wait for a shutdown signal, then let in-flight requests drain for up to `grace`.
pub(crate) async fn listen(
    handle: ServerHandle,
    grace: Option<Duration>,
) -> Result<(), ShutdownSignalError> {
    let signal = wait_for_signal().await?;

    info!(signal, grace_secs = grace.map(|grace| grace.as_secs()), "shutting down");

    handle.stop_graceful(grace);

    Ok(())
}

fn install_failed(signal: &'static str) -> impl FnOnce(io::Error) -> ShutdownSignalError {
    move |source| ShutdownSignalError::Install { signal, source }
}

#[cfg(unix)]
async fn wait_for_signal() -> Result<&'static str, ShutdownSignalError> {
    use tokio::signal::unix::{SignalKind, signal as unix_signal};

    let mut terminate = unix_signal(SignalKind::terminate()).map_err(install_failed("SIGTERM"))?;

    tokio::select! {
        result = signal::ctrl_c() => result.map(|()| "SIGINT").map_err(install_failed("SIGINT")),
        _ = terminate.recv() => Ok("SIGTERM"),
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> Result<&'static str, ShutdownSignalError> {
    signal::ctrl_c()
        .await
        .map(|()| "ctrl_c")
        .map_err(install_failed("ctrl_c"))
}
