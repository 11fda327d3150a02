//! Caller identity for admin-scoped operations.

pub mod session;

pub use session::{Caller, SessionClaims, SessionError, SessionVerifier};
