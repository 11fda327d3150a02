//! # Stagehand Server
//!
//! HTTP host for the Stagehand feature slices, built on `Axum` and `SurrealDB`.
//!
//! Startup order: TLS material is checked, the database is connected and migrated,
//! feature slices are initialized over it, and the router is assembled from the
//! system routes plus every slice's routes.
//!
//! ## Example
//! ```no_run
//! use stagehand_server::Server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Server::builder()
//!         .port(4583)
//!         .build()
//!         .await?
//!         .run()
//!         .await
//! }
//! ```

mod router;
mod shutdown;
mod tls;

use anyhow::{Context, Result};
use axum::Router;
use axum_server::Handle;
use stagehand::domain::config::{ApiConfig, DatabaseConfig};
use stagehand::kernel::server::ApiState;
use stagehand_database::Database;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::{error, info};

/// Time in-flight requests get to finish once a shutdown signal arrives.
const GRACE_PERIOD: Duration = Duration::from_secs(30);

/// Configures and assembles a [`Server`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct ServerBuilder {
    cfg: ApiConfig,
    database: Option<Database>,
}

impl ServerBuilder {
    /// Replaces the whole configuration.
    pub fn config(mut self, cfg: ApiConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.cfg.server.port = port;
        self
    }

    /// Reuses an open connection instead of connecting from `[database]`.
    /// The handle must already carry [`stagehand::migrations`].
    pub fn database(mut self, database: Database) -> Self {
        self.database = Some(database);
        self
    }

    /// Consumes the builder and initializes the server.
    ///
    /// # Errors
    /// * The configured TLS certificate or key is missing.
    /// * The database is unreachable or rejects the credentials.
    /// * A slice migration fails or was edited after being applied.
    pub async fn build(self) -> Result<Server> {
        if let Some(ssl) = &self.cfg.server.ssl {
            tls::check_files(ssl)?;
        }

        let database = match self.database {
            Some(database) => database,
            None => connect(&self.cfg.database).await?,
        };

        let slices = stagehand::init(&database);
        let state = ApiState::builder()
            .config(self.cfg)
            .db(database)
            .register_slices(slices)
            .build()
            .context("Failed to finalize API state registry")?;

        info!(slices = ?state.slice_names().collect::<Vec<_>>(), "Feature slices registered");
        Ok(Server { state })
    }
}

async fn connect(cfg: &DatabaseConfig) -> Result<Database> {
    let mut builder = Database::builder()
        .url(&cfg.url)
        .session(&cfg.namespace, &cfg.database)
        .migrations(stagehand::migrations());

    if let Some(creds) = &cfg.credentials {
        builder = builder.auth(&creds.username, &creds.password);
    }

    builder.init().await.context("Failed to establish database connection")
}

/// An assembled server, ready to [`run`](Server::run).
#[must_use = "call .run().await to start the server"]
#[derive(Debug)]
pub struct Server {
    state: ApiState,
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::default()
    }

    /// Socket address the server binds to.
    #[must_use]
    pub fn address(&self) -> SocketAddr {
        SocketAddr::new(self.state.config.server.address, self.state.config.server.port)
    }

    /// The complete HTTP router over a clone of the application state.
    #[must_use]
    pub fn router(&self) -> Router {
        router::init(self.state.clone())
    }

    #[must_use]
    pub const fn state(&self) -> &ApiState {
        &self.state
    }

    /// Serves HTTP (or HTTPS when `[server.ssl]` is set) until Ctrl+C or SIGTERM.
    ///
    /// # Errors
    /// Binding the address or loading the TLS key pair fails.
    pub async fn run(self) -> Result<()> {
        let address = self.address();
        let ssl = self.state.config.server.ssl.clone();
        let app = self.router().into_make_service();

        let handle = Handle::<SocketAddr>::new();
        tokio::spawn(drain_on_signal(handle.clone()));

        if let Some(ssl) = ssl {
            let tls = tls::load(&ssl).await?;
            info!("Listening on https://{address}");
            axum_server::bind_rustls(address, tls)
                .handle(handle)
                .serve(app)
                .await
                .context("HTTPS server failed")?;
        } else {
            info!("Listening on http://{address}");
            axum_server::bind(address).handle(handle).serve(app).await.context("HTTP server failed")?;
        }

        info!("Server shutdown complete");
        Ok(())
    }
}

async fn drain_on_signal(handle: Handle<SocketAddr>) {
    if let Err(e) = shutdown::signal().await {
        error!("Error while waiting for shutdown signal: {e}");
        return;
    }
    info!(grace = ?GRACE_PERIOD, "Shutdown signal received, draining connections");
    handle.graceful_shutdown(Some(GRACE_PERIOD));
}
