pub use crate::config::load_config;
pub use crate::domain::catalog::{CatalogKind, OptionValue};
pub use crate::domain::config::ApiConfig;
pub use crate::security::{Caller, SessionVerifier};
#[cfg(feature = "server")]
pub use crate::server::{ApiErrorBody, ApiResponse, ApiState};
