//! Persistence seam of the catalog.
//!
//! Implementations enforce uniqueness of `(kind, value)` themselves; a duplicate
//! caught by the store is reported as [`InsertOutcome::Duplicate`], not as an error.

mod surreal;

pub use surreal::SurrealCatalogStore;

use crate::error::CatalogError;
use stagehand_domain::catalog::{CatalogEntry, CatalogKind, EquipmentCategory, OptionValue};
use std::future::Future;

/// Result of [`CatalogStore::insert`].
#[derive(Debug, Clone, PartialEq)]
pub enum InsertOutcome {
    Created(CatalogEntry),
    /// Another writer stored the same value first.
    Duplicate,
}

pub trait CatalogStore: Clone + Send + Sync + 'static {
    /// Every persisted value of `kind`, in no particular order.
    fn list(
        &self,
        kind: CatalogKind,
    ) -> impl Future<Output = Result<Vec<OptionValue>, CatalogError>> + Send;

    /// The persisted entry exactly equal to `value`, if any.
    fn find(
        &self,
        kind: CatalogKind,
        value: &OptionValue,
    ) -> impl Future<Output = Result<Option<CatalogEntry>, CatalogError>> + Send;

    fn insert(
        &self,
        kind: CatalogKind,
        value: OptionValue,
    ) -> impl Future<Output = Result<InsertOutcome, CatalogError>> + Send;

    /// Equipment categories with their items, sorted by name.
    fn equipment_categories(
        &self,
    ) -> impl Future<Output = Result<Vec<EquipmentCategory>, CatalogError>> + Send;
}
