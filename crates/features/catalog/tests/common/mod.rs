#![allow(dead_code)]

use parking_lot::Mutex;
use stagehand_catalog::{Candidate, CatalogError};
use stagehand_catalog::store::{CatalogStore, InsertOutcome};
use stagehand_domain::catalog::{CatalogEntry, CatalogKind, EquipmentCategory, OptionValue};
use stagehand_domain::constants::GENERAL_EQUIPMENT_CATEGORY;
use stagehand_kernel::security::{Caller, SessionClaims};
use std::sync::Arc;

const GENERAL_ID: &str = "equipment_category:general";

#[derive(Debug, Default)]
struct MemoryState {
    entries: Vec<CatalogEntry>,
    inserts: usize,
    unavailable: bool,
    lose_next_race: bool,
}

/// In-memory [`CatalogStore`] with failure injection.
#[derive(Debug, Clone, Default)]
pub(crate) struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    /// Stores `value` directly, bypassing the service.
    pub(crate) fn seed(&self, kind: CatalogKind, value: impl Into<OptionValue>) {
        let mut state = self.state.lock();
        let entry = entry(kind, value.into(), state.entries.len());
        state.entries.push(entry);
    }

    /// Number of successful inserts issued through [`CatalogStore::insert`].
    pub(crate) fn inserts(&self) -> usize {
        self.state.lock().inserts
    }

    pub(crate) fn persisted(&self, kind: CatalogKind) -> usize {
        self.state.lock().entries.iter().filter(|e| e.kind == kind).count()
    }

    /// Every call fails with [`CatalogError::StorageUnavailable`] while set.
    pub(crate) fn set_unavailable(&self, unavailable: bool) {
        self.state.lock().unavailable = unavailable;
    }

    /// The next insert finds its value already written by another writer.
    pub(crate) fn lose_next_race(&self) {
        self.state.lock().lose_next_race = true;
    }

    fn check(state: &MemoryState) -> Result<(), CatalogError> {
        if state.unavailable {
            return Err(CatalogError::StorageUnavailable {
                message: "connection refused".into(),
                context: Some("Memory store".into()),
            });
        }
        Ok(())
    }
}

fn entry(kind: CatalogKind, value: OptionValue, index: usize) -> CatalogEntry {
    let id = match kind {
        CatalogKind::EquipmentName => GENERAL_ID.to_owned(),
        CatalogKind::Amount => format!("catalog_amount:{index}"),
        _ => format!("catalog_option:{index}"),
    };
    CatalogEntry { id, kind, value }
}

impl CatalogStore for MemoryStore {
    async fn list(&self, kind: CatalogKind) -> Result<Vec<OptionValue>, CatalogError> {
        let state = self.state.lock();
        Self::check(&state)?;
        Ok(state.entries.iter().filter(|e| e.kind == kind).map(|e| e.value.clone()).collect())
    }

    async fn find(
        &self,
        kind: CatalogKind,
        value: &OptionValue,
    ) -> Result<Option<CatalogEntry>, CatalogError> {
        let state = self.state.lock();
        Self::check(&state)?;
        Ok(state.entries.iter().find(|e| e.kind == kind && &e.value == value).cloned())
    }

    async fn insert(
        &self,
        kind: CatalogKind,
        value: OptionValue,
    ) -> Result<InsertOutcome, CatalogError> {
        let mut state = self.state.lock();
        Self::check(&state)?;

        let index = state.entries.len();
        if std::mem::take(&mut state.lose_next_race) {
            state.entries.push(entry(kind, value, index));
            return Ok(InsertOutcome::Duplicate);
        }
        if state.entries.iter().any(|e| e.kind == kind && e.value == value) {
            return Ok(InsertOutcome::Duplicate);
        }

        let created = entry(kind, value, index);
        state.entries.push(created.clone());
        state.inserts += 1;
        Ok(InsertOutcome::Created(created))
    }

    async fn equipment_categories(&self) -> Result<Vec<EquipmentCategory>, CatalogError> {
        let state = self.state.lock();
        Self::check(&state)?;

        let items: Vec<String> = state
            .entries
            .iter()
            .filter(|e| e.kind == CatalogKind::EquipmentName)
            .filter_map(|e| e.value.as_text().map(str::to_owned))
            .collect();

        if items.is_empty() {
            return Ok(Vec::new());
        }
        Ok(vec![EquipmentCategory {
            id: GENERAL_ID.to_owned(),
            name: GENERAL_EQUIPMENT_CATEGORY.to_owned(),
            items,
        }])
    }
}

pub(crate) fn admin() -> Caller {
    Caller::Admin(SessionClaims {
        sub: "ops@stagehand".to_owned(),
        role: "admin".to_owned(),
        iss: "stagehand".to_owned(),
        iat: 0,
        exp: i64::MAX,
    })
}

/// A sample valid value for `kind`.
pub(crate) fn sample(kind: CatalogKind) -> OptionValue {
    match kind {
        CatalogKind::Amount => OptionValue::Amount(1234.0),
        _ => OptionValue::Text(format!("Custom {kind}")),
    }
}

pub(crate) fn candidate(value: &OptionValue) -> Candidate {
    match value {
        OptionValue::Text(text) => Candidate::Text(text.clone()),
        OptionValue::Amount(amount) => Candidate::Number(*amount),
    }
}
