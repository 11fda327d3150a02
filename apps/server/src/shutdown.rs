use anyhow::{Context, Result};
use tokio::signal;

/// Resolves on Ctrl+C, or on SIGTERM where the platform has it.
pub(crate) async fn signal() -> Result<()> {
    let interrupt = async { signal::ctrl_c().await.context("Failed to install Ctrl+C handler") };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("Failed to install SIGTERM handler")?
            .recv()
            .await;
        Ok::<_, anyhow::Error>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<()>>();

    tokio::select! {
        res = interrupt => res,
        res = terminate => res,
    }
}
