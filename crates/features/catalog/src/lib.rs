//! # Option catalog
//!
//! Each [`CatalogKind`](stagehand_domain::catalog::CatalogKind) is one logical list:
//! the built-in baseline values followed by custom values added by admins.
//!
//! * [`CatalogService::list_options`] merges and deduplicates at read time.
//! * [`CatalogService::add_option`] is idempotent; a value already in the baseline or
//!   in storage is reported as such, never stored twice.
//! * [`store::SurrealCatalogStore`] persists custom values and enforces uniqueness with
//!   unique indexes installed by [`MIGRATIONS`].

mod baseline;
mod candidate;
mod error;
pub mod merge;
mod service;
pub mod store;

#[cfg(feature = "server")]
pub mod api;

pub use baseline::Baselines;
pub use candidate::Candidate;
pub use error::{CatalogError, CatalogErrorExt};
pub use service::{AddOutcome, CatalogService};

use stagehand_database::{Database, Migration};
use stagehand_kernel::domain::registry::InitializedSlice;
use store::SurrealCatalogStore;

/// Schema owned by this slice, applied in order at start-up.
pub const MIGRATIONS: &[Migration] =
    &[Migration::new("catalog", "0001", include_str!("../migrations/0001_catalog.surql"))];

/// Catalog feature state
#[stagehand_derive::stagehand_slice]
pub struct Catalog {
    pub service: CatalogService,
}

/// Initialize the catalog slice over `database`.
#[must_use]
pub fn init(database: Database) -> InitializedSlice {
    let service = CatalogService::new(SurrealCatalogStore::new(database));
    tracing::info!("Catalog slice initialized");

    InitializedSlice::new(Catalog::new(CatalogInner { service }))
}
