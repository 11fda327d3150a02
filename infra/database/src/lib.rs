//! # Database Infrastructure
//!
//! This crate provides a unified interface for initializing and managing [SurrealDB](https://surrealdb.com)
//! connections across the workspace.
//!
//! ## Key Features
//! - **Engine Agnostic**: Supports `mem://`, `rocksdb://`, `ws://`, and `http://` via the `any` engine.
//! - **Resilient Connectivity**: Built-in retry logic for health checks during engine startup.
//! - **Slice Migrations**: Feature slices contribute versioned, checksummed schema scripts.
//! - **Builder Pattern**: Fluent API for configuring connections and authentication.
//!
//! ## Example
//!
//! ```rust
//! use stagehand_database::{Database, DatabaseError, Migration};
//!
//! const SCHEMA: Migration = Migration::new("demo", "0001", "DEFINE TABLE IF NOT EXISTS demo SCHEMALESS;");
//!
//! #[tokio::main]
//! async fn main() -> Result<(), DatabaseError> {
//!     let db = Database::builder()
//!         .url("mem://")
//!         .session("stagehand", "cms")
//!         .migrations([SCHEMA])
//!         .init()
//!         .await?;
//!
//!     let _version = db.version().await?;
//!
//!     Ok(())
//! }
//! ```

mod error;
mod migrations;

pub use error::{DatabaseError, DatabaseErrorExt, is_transaction_conflict, is_unique_violation};
pub use migrations::{AppliedMigration, Migration, MigrationReport};

use migrations::MigrationRunner;
use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;
use surrealdb::Surreal;
use surrealdb::engine::any::{Any, connect};
use surrealdb::opt::auth::Root;
use tracing::{info, instrument, trace, warn};

/// Number of health probes before the engine is declared unreachable.
const HEALTH_ATTEMPTS: u32 = 3;
/// Delay before the second probe; doubled for each further attempt.
const HEALTH_BACKOFF: Duration = Duration::from_millis(500);

/// Inner state of the [`Database`] wrapper.
#[derive(Debug)]
pub struct DatabaseInner {
    instance: Surreal<Any>,
    ns: String,
    db: String,
}

impl Drop for DatabaseInner {
    fn drop(&mut self) {
        info!(ns = %self.ns, db = %self.db, "SurrealDB session handle dropped");
    }
}

/// `SurrealDB` client wrapper that provides thread-safety and contextual error handling.
#[derive(Debug, Clone)]
pub struct Database {
    inner: Arc<DatabaseInner>,
}

impl Database {
    /// Creates a new [`DatabaseBuilder`].
    pub fn builder() -> DatabaseBuilder {
        DatabaseBuilder::new()
    }

    /// Namespace the session is bound to.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.inner.ns
    }

    /// Database name the session is bound to.
    #[must_use]
    pub fn database(&self) -> &str {
        &self.inner.db
    }

    /// Whether the engine currently answers health probes.
    pub async fn is_healthy(&self) -> bool {
        self.inner.instance.health().await.is_ok()
    }
}

impl Deref for Database {
    type Target = Surreal<Any>;

    fn deref(&self) -> &Self::Target {
        &self.inner.instance
    }
}

/// A fluent builder for configuring and establishing a `SurrealDB` connection.
///
/// This builder ensures that fundamental parameters like the connection URL,
/// namespace, and database name are provided upfront.
#[must_use = "builders do nothing unless you call .init()"]
#[derive(Debug, Default)]
pub struct DatabaseBuilder {
    url: Option<String>,
    ns: Option<String>,
    db: Option<String>,
    auth: Option<(String, String)>,
    migrations: Vec<Migration>,
}

impl DatabaseBuilder {
    /// Creates a new [`DatabaseBuilder`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the connection URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the namespace and database name.
    pub fn session(mut self, namespace: impl Into<String>, database: impl Into<String>) -> Self {
        self.ns = Some(namespace.into());
        self.db = Some(database.into());
        self
    }

    /// Add root credentials to the connection.
    pub fn auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth = Some((username.into(), password.into()));
        self
    }

    /// Appends schema migrations, applied in the given order after connecting.
    pub fn migrations(mut self, migrations: impl IntoIterator<Item = Migration>) -> Self {
        self.migrations.extend(migrations);
        self
    }

    /// Consumes the builder and attempts to establish a connection to the database.
    ///
    /// # Process
    /// 1. **Validation**: Ensures URL, Namespace, and Database name are provided.
    /// 2. **Engine Initialization**: Connects to the underlying `SurrealDB` engine (Any).
    /// 3. **Resilience**: Performs up to 3 health checks. If the first check fails,
    ///    it retries with exponential backoff (starting at 500ms).
    /// 4. **Authentication**: If credentials were provided via [`DatabaseBuilder::auth`], signs in as a Root user.
    /// 5. **Session Activation**: Sets the namespace and database for the connection.
    /// 6. **Migrations**: Applies pending slice migrations, verifying checksums of applied ones.
    ///
    /// # Errors
    /// * [`DatabaseError::Validation`] if required parameters are missing.
    /// * [`DatabaseError::Connection`] if the engine fails to start or remains unhealthy.
    /// * [`DatabaseError::Auth`] if the provided credentials are rejected.
    /// * [`DatabaseError::Surreal`] if session activation or a migration script fails.
    /// * [`DatabaseError::Migration`] if an applied migration was edited afterwards.
    #[instrument(skip(self), fields(url = self.url, ns = self.ns, db = self.db))]
    pub async fn init(self) -> Result<Database, DatabaseError> {
        let url = self.url.ok_or(DatabaseError::Validation {
            message: "URL is required".into(),
            context: None,
        })?;
        let ns = self.ns.ok_or(DatabaseError::Validation {
            message: "Namespace is required".into(),
            context: None,
        })?;
        let db = self.db.ok_or(DatabaseError::Validation {
            message: "Database is required".into(),
            context: None,
        })?;

        let instance = connect(&url).await.map_err(|e| DatabaseError::Connection {
            message: e.to_string().into(),
            context: Some("Initializing engine".into()),
        })?;

        // 1. Connectivity & Health Check with Retries
        let mut delay = HEALTH_BACKOFF;
        for attempt in 1..=HEALTH_ATTEMPTS {
            if instance.health().await.is_ok() {
                break;
            }
            if attempt == HEALTH_ATTEMPTS {
                return Err(DatabaseError::Connection {
                    message: "Unhealthy after retries".into(),
                    context: Some(url.into()),
                });
            }
            warn!(attempt, ?delay, "Database not ready, retrying...");
            tokio::time::sleep(delay).await;
            delay *= 2;
        }

        // 2. Authentication
        if let Some((username, password)) = self.auth {
            instance.signin(Root { username, password }).await.map_err(|e| {
                DatabaseError::Auth { message: e.to_string().into(), context: Some(url.into()) }
            })?;
        }

        // 3. Session Initialization
        instance.use_ns(&ns).use_db(&db).await.context("Activating session")?;

        let version =
            instance.version().await.map_or_else(|_| "unknown".to_owned(), |v| v.to_string());
        info!(namespace = %ns, database = %db, %version, "SurrealDB connection established");

        // 4. Schema
        info!(count = self.migrations.len(), "Applying database migrations...");
        let report = MigrationRunner::new(instance.clone()).run(&self.migrations).await?;
        for skipped in report.skipped {
            trace!(slice = skipped.slice, version = skipped.version, "Skipping migration");
        }
        for applied in report.applied {
            info!(slice = applied.slice, version = applied.version, "Applied migration");
        }
        info!("Database migrations applied successfully");

        Ok(Database { inner: Arc::new(DatabaseInner { instance, ns, db }) })
    }
}
