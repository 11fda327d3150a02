//! Kernel utilities shared across slices.
//! Keep this crate lightweight: layered config loading, admin session verification
//! and (with the `server` feature) the axum state, envelope and health endpoint.
//!
//! ## Sessions
//! ```rust
//! use stagehand_kernel::domain::config::SessionConfig;
//! use stagehand_kernel::security::{Caller, SessionVerifier};
//!
//! let sessions = SessionVerifier::new(&SessionConfig::default());
//! let token = sessions.issue("ops@stagehand", "admin").unwrap();
//! assert!(sessions.caller(Some(&token)).is_admin());
//! assert_eq!(sessions.caller(None), Caller::Anonymous);
//! ```
pub mod config;
pub mod prelude;
pub mod security;
#[cfg(feature = "server")]
pub mod server;

pub use stagehand_domain as domain;
