//! The option catalog: baseline values merged with persisted custom values.

use crate::baseline::Baselines;
use crate::candidate::Candidate;
use crate::error::CatalogError;
use crate::merge::{merge_amounts, merge_text};
use crate::store::{CatalogStore, InsertOutcome, SurrealCatalogStore};
use serde::Serialize;
use stagehand_domain::catalog::{
    CatalogEntry, CatalogKind, EquipmentCategory, KindInfo, OptionValue, ValueType,
};
use stagehand_kernel::security::Caller;
use strum::IntoEnumIterator;
use tracing::{info, instrument, warn};

/// Result of a successful [`CatalogService::add_option`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum AddOutcome {
    /// The value is part of the built-in baseline; nothing was stored.
    Baseline { value: OptionValue },
    /// The value was already persisted.
    Existing { entry: CatalogEntry },
    /// A new entry was persisted.
    Created { entry: CatalogEntry },
}

impl AddOutcome {
    #[must_use]
    pub const fn is_created(&self) -> bool {
        matches!(self, Self::Created { .. })
    }

    #[must_use]
    pub const fn value(&self) -> &OptionValue {
        match self {
            Self::Baseline { value } => value,
            Self::Existing { entry } | Self::Created { entry } => &entry.value,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CatalogService<S = SurrealCatalogStore> {
    store: S,
    baselines: Baselines,
}

impl<S: CatalogStore> CatalogService<S> {
    /// Service over `store` with the built-in baselines.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_baselines(store, Baselines::builtin())
    }

    #[must_use]
    pub const fn with_baselines(store: S, baselines: Baselines) -> Self {
        Self { store, baselines }
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Every supported kind with its value type and access rule.
    #[must_use]
    pub fn list_kinds(&self) -> Vec<KindInfo> {
        CatalogKind::iter().map(KindInfo::from).collect()
    }

    /// Merged options of `kind`: baseline first, then custom values, no duplicates.
    ///
    /// Amounts are the exception and come back as one ascending numeric list.
    ///
    /// # Errors
    /// * [`CatalogError::Unauthorized`] for anonymous callers on admin-only kinds.
    /// * [`CatalogError::StorageUnavailable`] if the store cannot be read.
    #[instrument(skip(self, caller), fields(admin = caller.is_admin()))]
    pub async fn list_options(
        &self,
        caller: &Caller,
        kind: CatalogKind,
    ) -> Result<Vec<OptionValue>, CatalogError> {
        if kind.is_admin_only() && !caller.is_admin() {
            return Err(CatalogError::unauthorized(format!("Listing {kind}")));
        }

        let persisted = self.store.list(kind).await?;
        let baseline = self.baselines.values(kind);

        let merged: Vec<OptionValue> = match kind.value_type() {
            ValueType::Text => merge_text(
                baseline.iter().filter_map(OptionValue::as_text),
                persisted.into_iter().filter_map(into_text).collect(),
            )
            .into_iter()
            .map(OptionValue::Text)
            .collect(),
            ValueType::Number => merge_amounts(
                baseline.iter().filter_map(OptionValue::as_amount),
                persisted.iter().filter_map(OptionValue::as_amount).collect(),
            )
            .into_iter()
            .map(OptionValue::Amount)
            .collect(),
        };

        Ok(merged)
    }

    /// Adds a custom option; repeated calls with the same value are no-ops.
    ///
    /// The check order is baseline, then persisted entries, then insert. A
    /// duplicate rejected by the store is reported as [`AddOutcome::Existing`].
    ///
    /// # Errors
    /// * [`CatalogError::Unauthorized`] for anonymous callers (checked first).
    /// * [`CatalogError::InvalidInput`] for blank or non-positive values.
    /// * [`CatalogError::StorageUnavailable`] if the store fails.
    #[instrument(skip(self, caller, candidate), fields(admin = caller.is_admin()))]
    pub async fn add_option(
        &self,
        caller: &Caller,
        kind: CatalogKind,
        candidate: Candidate,
    ) -> Result<AddOutcome, CatalogError> {
        if !caller.is_admin() {
            return Err(CatalogError::unauthorized(format!("Adding {kind} option")));
        }

        let value = candidate.validate(kind)?;

        if self.baselines.contains(kind, &value) {
            return Ok(AddOutcome::Baseline { value });
        }

        if let Some(entry) = self.store.find(kind, &value).await? {
            return Ok(AddOutcome::Existing { entry });
        }

        match self.store.insert(kind, value.clone()).await? {
            InsertOutcome::Created(entry) => {
                info!(%kind, value = %entry.value, by = caller.subject(), "Catalog option created");
                Ok(AddOutcome::Created { entry })
            }
            InsertOutcome::Duplicate => {
                warn!(%kind, %value, "Concurrent insert won; reporting existing entry");
                self.existing(kind, value).await
            }
        }
    }

    /// Equipment categories and their items, sorted by name.
    ///
    /// # Errors
    /// Returns [`CatalogError::StorageUnavailable`] if the store cannot be read.
    pub async fn list_equipment_categories(&self) -> Result<Vec<EquipmentCategory>, CatalogError> {
        self.store.equipment_categories().await
    }

    async fn existing(
        &self,
        kind: CatalogKind,
        value: OptionValue,
    ) -> Result<AddOutcome, CatalogError> {
        let entry = self.store.find(kind, &value).await?.ok_or_else(|| CatalogError::Internal {
            message: format!("Duplicate {kind} option '{value}' not found on re-read").into(),
            context: Some("Adding option".into()),
        })?;

        Ok(AddOutcome::Existing { entry })
    }
}

fn into_text(value: OptionValue) -> Option<String> {
    match value {
        OptionValue::Text(text) => Some(text),
        OptionValue::Amount(_) => None,
    }
}
