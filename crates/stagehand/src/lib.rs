//! Facade crate for Stagehand features and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `stagehand` with the `server` feature for the HTTP API.
//! - Pass [`migrations`] to the database builder, then call [`init`] to register feature slices.

use stagehand_database::{Database, Migration};
pub use stagehand_domain as domain;
pub use stagehand_kernel as kernel;

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        use stagehand_kernel::server::ApiState;
        pub use stagehand_kernel::server::router::system_router;
        use utoipa_axum::router::OpenApiRouter;

        /// Routes of every enabled feature slice.
        #[must_use]
        pub fn features_router() -> OpenApiRouter<ApiState> {
            OpenApiRouter::new().merge(crate::features::catalog::api::router())
        }
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use stagehand_catalog as catalog;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "server")]
        "server",
        "catalog",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Schema migrations of every feature, in dependency order.
pub fn migrations() -> impl Iterator<Item = Migration> {
    features::catalog::MIGRATIONS.iter().copied()
}

/// Initialize all features over an already migrated database.
#[must_use]
pub fn init(database: &Database) -> Vec<domain::registry::InitializedSlice> {
    vec![
        // Option catalog
        features::catalog::init(database.clone()),
    ]
}
