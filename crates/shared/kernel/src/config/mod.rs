use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Prefix of environment overrides, e.g. `STAGEHAND__DATABASE__URL`.
pub const ENV_PREFIX: &str = "STAGEHAND";
const ENV_SEPARATOR: &str = "__";
const DEFAULT_CONFIG: &str = "server";

/// Custom error type for config loading.
#[stagehand_derive::stagehand_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads a configuration file overlaid with environment overrides.
///
/// 1. **Base File**: settings from `path` (format inferred from the extension).
///    Without a path, the `server` file of the working directory is used (`server.toml`).
/// 2. **Environment Overrides**: variables prefixed with `STAGEHAND__`. Nested keys
///    use double underscores (`STAGEHAND__SECURITY__SESSION__SECRET` maps to
///    `security.session.secret`).
///
/// # Errors
/// * The configuration file cannot be found.
/// * The content does not match the structure of `T`.
///
/// # Example
/// ```rust
/// use stagehand_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_layered(path, environment())
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR).try_parsing(true)
}

fn load_layered<T>(path: Option<impl AsRef<Path>>, env: Environment) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG), |p| p.as_ref().to_path_buf());

    info!("Loading config from {}", effective_path.display());

    let config = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(true))
        .add_source(env)
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
