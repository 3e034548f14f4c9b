//! OS signal handling.
//!
//! Ctrl+C, SIGTERM (unix), or an explicit [`Shutdown`](super::Shutdown)
//! trigger all resolve the same future.

use std::future;

use super::shutdown::ShutdownListener;

/// Resolves when the process should begin graceful shutdown.
pub async fn shutdown_signal(listener: ShutdownListener) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Ctrl+C received"),
        _ = terminate => tracing::info!("SIGTERM received"),
        _ = listener.triggered() => tracing::info!("Shutdown triggered"),
    }
}
