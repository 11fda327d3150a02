use anyhow::{Context, Result, bail};
use axum_server::tls_rustls::RustlsConfig;
use stagehand::domain::config::SslConfig;

/// Fails fast on missing PEM files; warns when the key is readable by others.
pub(crate) fn check_files(ssl: &SslConfig) -> Result<()> {
    if !ssl.cert.exists() {
        bail!("SSL certificate not found at: {}", ssl.cert.display());
    }
    if !ssl.key.exists() {
        bail!("SSL key not found at: {}", ssl.key.display());
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = ssl.key.metadata()?.permissions().mode();
        if mode & 0o077 != 0 {
            tracing::warn!(key = %ssl.key.display(), mode = format!("{mode:o}"), "SSL private key is accessible by group or others (expected 600)");
        }
    }

    Ok(())
}

pub(crate) async fn load(ssl: &SslConfig) -> Result<RustlsConfig> {
    RustlsConfig::from_pem_file(&ssl.cert, &ssl.key).await.context("Failed to load SSL/TLS certificates")
}
