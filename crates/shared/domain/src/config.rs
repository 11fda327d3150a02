use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level API configuration shared across services.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfigInner {
    pub server: ServerConfig,
    pub security: SecurityConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(flatten, default)]
    inner: Arc<ApiConfigInner>,
}

impl Deref for ApiConfig {
    type Target = ApiConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ApiConfig {
    fn deref_mut(&mut self) -> &mut ApiConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    pub ssl: Option<SslConfig>,
}

/// TLS certificate/key paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SslConfig {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// `SurrealDB` connection configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub namespace: String,
    pub database: String,
    pub credentials: Option<DatabaseCredentials>,
}

/// `SurrealDB` root credentials (optional when using unauthenticated engines like mem://).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseCredentials {
    pub username: String,
    pub password: String,
}

/// API security knobs.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub session: SessionConfig,
}

/// Admin session token verification.
///
/// Tokens are HS256-signed JWTs issued by the dashboard login flow and carried
/// in the cookie named by `cookie` or in an `Authorization: Bearer` header.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub secret: String,
    pub issuer: String,
    pub cookie: String,
    pub ttl_seconds: u64,
    pub leeway_seconds: u64,
}

/// Log output settings consumed by the server binary.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub console: bool,
    pub directory: Option<PathBuf>,
    pub json: bool,
    pub filter: Option<String>,
}

// --- Default ---

impl Default for ServerConfig {
    fn default() -> Self {
        Self { address: IpAddr::V4(Ipv4Addr::UNSPECIFIED), port: 4583, ssl: None }
    }
}

impl Default for SslConfig {
    fn default() -> Self {
        Self { cert: PathBuf::from("cert.pem"), key: PathBuf::from("key.pem") }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "mem://".to_owned(),
            namespace: "stagehand".to_owned(),
            database: "cms".to_owned(),
            credentials: None,
        }
    }
}

impl Default for DatabaseCredentials {
    fn default() -> Self {
        Self { username: "root".to_owned(), password: "root".to_owned() }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: "dev-only-change-me".to_owned(),
            issuer: "stagehand".to_owned(),
            cookie: "admin_session".to_owned(),
            ttl_seconds: 60 * 60 * 24,
            leeway_seconds: 60,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), console: true, directory: None, json: false, filter: None }
    }
}
