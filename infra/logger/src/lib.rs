//! # Logger
//!
//! Centralized `tracing` setup for the server: console and rolling-file output,
//! plain or JSON lines, and environment-based filtering.
//!
//! * Use [`LoggerBuilder::env_filter`] to set module-directed filters
//!   (e.g., `"stagehand_catalog=debug,tower_http=info"`), in addition to `RUST_LOG`.
//! * Use [`LoggerBuilder::level_name`] when the level comes from configuration text.
//!
//! ## Example
//!
//! ```rust
//! # use stagehand_logger::{Logger, LevelFilter};
//!
//! let _logger = Logger::builder()
//!     .name("stagehand")
//!     .console(true)
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use private::Sealed;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

const DEFAULT_MAX_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";

/// Line format shared by every enabled output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Compact,
    Json,
}

#[derive(Debug)]
pub struct LoggerConfig {
    console: bool,
    path: Option<PathBuf>,
    level: LevelFilter,
    rotation: Rotation,
    max_files: usize,
    format: Format,
    env_filter: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            console: true,
            path: None,
            level: LevelFilter::INFO,
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            format: Format::Compact,
            env_filter: None,
        }
    }
}

#[derive(Debug)]
pub struct NoName;
#[derive(Debug)]
pub struct WithName(String);
#[derive(Debug)]
pub struct NoFile;
#[derive(Debug)]
pub struct WithFile;

mod private {
    pub trait Sealed {}
}
impl Sealed for NoName {}
impl Sealed for WithName {}
impl Sealed for NoFile {}
impl Sealed for WithFile {}

/// A builder for configuring and initializing the global tracing subscriber.
#[derive(Debug)]
pub struct LoggerBuilder<N: Sealed = NoName, F: Sealed = NoFile> {
    config: LoggerConfig,
    name: N,
    file_state: std::marker::PhantomData<F>,
}

impl<F: Sealed> LoggerBuilder<NoName, F> {
    /// Sets the name of the logger; also the prefix of rolling log files.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<WithName, F> {
        LoggerBuilder {
            name: WithName(name.into()),
            config: self.config,
            file_state: std::marker::PhantomData,
        }
    }
}

impl LoggerBuilder<WithName, WithFile> {
    /// Configures maximum number of log files to keep.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn max_files(mut self, max: usize) -> Self {
        self.config.max_files = max;
        self
    }

    /// Configures the log file rotation strategy.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn rotation(mut self, rotation: Rotation) -> Self {
        self.config.rotation = rotation;
        self
    }
}

impl<F: Sealed> LoggerBuilder<WithName, F> {
    /// Configures the minimum log level to be emitted.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.config.level = level;
        self
    }

    /// Configures the minimum level from its textual name (`"debug"`, `"warn"`, ...).
    ///
    /// # Errors
    /// Returns [`LoggerError::InvalidConfiguration`] for unknown level names.
    pub fn level_name(mut self, level: &str) -> Result<Self, LoggerError> {
        self.config.level =
            LevelFilter::from_str(level.trim()).map_err(|e| LoggerError::InvalidConfiguration {
                message: format!("Unknown log level '{level}': {e}").into(),
                context: None,
            })?;
        Ok(self)
    }

    /// Adds an explicit env filter (e.g., `stagehand_catalog=debug,tower_http=info`).
    ///
    /// Invalid filters will cause [`LoggerBuilder::init`] to return an error.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.config.env_filter = Some(filter.into());
        self
    }

    /// Enables console logging.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.config.console = enabled;
        self
    }

    /// Emits JSON lines instead of the compact human format.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn json(mut self, enabled: bool) -> Self {
        self.config.format = if enabled { Format::Json } else { Format::Compact };
        self
    }

    /// Sets the directory for rolling log files.
    pub fn path(self, path: impl Into<PathBuf>) -> LoggerBuilder<WithName, WithFile> {
        let mut config = self.config;
        config.path = Some(path.into());
        LoggerBuilder { config, name: self.name, file_state: std::marker::PhantomData }
    }

    /// Consumes the builder and initializes the global tracing subscriber.
    ///
    /// # Returns
    /// A [`Logger`] handle. **Note:** This handle contains a [`WorkerGuard`]
    /// that must be kept alive for the duration of the program to ensure
    /// that non-blocking logs are flushed correctly.
    ///
    /// # Errors
    /// Returns [`LoggerError::Subscriber`] if a global subscriber has already been set.
    /// Returns [`LoggerError::InvalidConfiguration`] for invalid builder settings.
    pub fn init(self) -> Result<Logger, LoggerError> {
        validate_config(&self.config, &self.name.0)?;

        let env_filter = build_env_filter(&self.config)?;
        let format = self.config.format;

        let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

        if self.config.console {
            let console = layer().with_ansi(format == Format::Compact);
            layers.push(match format {
                Format::Compact => console.compact().boxed(),
                Format::Json => console.json().boxed(),
            });
        }

        let guard = if let Some(path) = self.config.path {
            fs::create_dir_all(&path).map_err(|e| LoggerError::Internal {
                message: e.to_string().into(),
                context: Some(format!("Failed to create path: {}", path.display()).into()),
            })?;

            let file_appender = RollingFileAppender::builder()
                .rotation(self.config.rotation)
                .filename_prefix(&self.name.0)
                .filename_suffix(LOG_FILE_SUFFIX)
                .max_log_files(self.config.max_files)
                .build(path)?;

            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let file = layer().with_writer(non_blocking).with_ansi(false);

            layers.push(match format {
                Format::Compact => file.boxed(),
                Format::Json => file.json().boxed(),
            });
            Some(guard)
        } else {
            None
        };

        if layers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "No logging layers enabled. Enable console or file output.".into(),
                context: None,
            });
        }

        tracing_subscriber::registry().with(layers).with(env_filter).try_init()?;

        Ok(Logger { guard })
    }
}

/// A handle to the initialized logging system.
///
/// This struct holds the background worker guard. Drop it only
/// when the application is shutting down.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Returns a new [`LoggerBuilder`] to configure the global tracing subscriber.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stagehand_logger::{LevelFilter, Logger};
    ///
    /// let _logger = Logger::builder()
    ///     .name("stagehand")
    ///     .level(LevelFilter::DEBUG)
    ///     .init()
    ///     .unwrap();
    /// ```
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder {
            config: LoggerConfig::default(),
            name: NoName,
            file_state: std::marker::PhantomData,
        }
    }

    /// Returns a reference to the underlying worker guard, if present.
    #[must_use]
    pub const fn guard(&self) -> Option<&WorkerGuard> {
        self.guard.as_ref()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("Logging system shutting down, flushing buffers...");
        }
    }
}

fn validate_config(config: &LoggerConfig, name: &str) -> Result<(), LoggerError> {
    if name.trim().is_empty() {
        return Err(LoggerError::InvalidConfiguration {
            message: "Logger name cannot be empty".into(),
            context: None,
        });
    }

    if config.max_files == 0 {
        return Err(LoggerError::InvalidConfiguration {
            message: "max_files must be greater than zero".into(),
            context: None,
        });
    }

    Ok(())
}

fn build_env_filter(config: &LoggerConfig) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(config.level.into());
    config.env_filter.as_ref().map_or_else(
        || Ok(builder.from_env_lossy()),
        |filter| {
            builder.parse(filter).map_err(|e| LoggerError::InvalidConfiguration {
                message: format!("Invalid env filter '{filter}': {e}").into(),
                context: None,
            })
        },
    )
}
