//! Graceful shutdown

use std::{io, time::Duration};

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;
use tracing::info;

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("failed to install Ctrl+C handler: {0}")]
    CtrlC(#[source] io::Error),

    #[error("failed to install terminate handler: {0}")]
    Terminate(#[source] io::Error),
}

/// Wait for an interrupt or terminate signal, then stop accepting connections and
/// give in-flight requests `grace` to finish.
pub(crate) async fn listen(handle: ServerHandle, grace: Duration) -> Result<(), ShutdownSignalError> {
    let signal_name = tokio::select! {
        result = signal::ctrl_c() => {
            result.map_err(ShutdownSignalError::CtrlC)?;

            "ctrl_c"
        }
        result = terminate() => {
            result?;

            "terminate"
        }
    };

    info!(
        signal = signal_name,
        grace_seconds = grace.as_secs(),
        "shutting down"
    );

    handle.stop_graceful(Some(grace));

    Ok(())
}

#[cfg(unix)]
async fn terminate() -> Result<(), ShutdownSignalError> {
    signal::unix::signal(signal::unix::SignalKind::terminate())
        .map_err(ShutdownSignalError::Terminate)?
        .recv()
        .await;

    Ok(())
}

#[cfg(windows)]
async fn terminate() -> Result<(), ShutdownSignalError> {
    signal::windows::ctrl_close()
        .map_err(ShutdownSignalError::Terminate)?
        .recv()
        .await;

    Ok(())
}
