//! Axum plumbing shared by the feature slices.

mod extract;
mod health;
pub mod response;
pub mod router;
pub mod state;

pub use response::{ApiErrorBody, ApiResponse};
pub use router::system_router;
pub use state::{ApiState, ApiStateBuilder, ApiStateError};
