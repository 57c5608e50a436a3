//! Utility functions.

use tokio::sync::watch;
use tracing::info;

/// Resolve when the process receives Ctrl-C or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

/// Channel that flips to `true` once [`shutdown_signal`] resolves.
pub fn shutdown_channel() -> watch::Receiver<bool> {
    let (tx, rx) = watch::channel(false);

    tokio::spawn(async move {
        shutdown_signal().await;
        tx.send_replace(true);
        // Keep the sender alive so receivers see `true` rather than a closed channel.
        tx.closed().await;
    });

    rx
}

/// Wait until a shutdown receiver observes `true`.
pub async fn wait_for_shutdown(mut rx: watch::Receiver<bool>) {
    // A closed channel also counts as shutdown.
    let _ = rx.wait_for(|stopped| *stopped).await;
}
