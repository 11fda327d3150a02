use super::{CatalogStore, InsertOutcome};
use crate::error::CatalogError;
use stagehand_database::{Database, is_transaction_conflict, is_unique_violation};
use stagehand_domain::catalog::{CatalogEntry, CatalogKind, EquipmentCategory, OptionValue};
use stagehand_domain::constants::GENERAL_EQUIPMENT_CATEGORY;
use std::time::{Duration, Instant};
use surrealdb::IndexedResults;
use surrealdb::types::SurrealValue;
use tracing::{debug, instrument, warn};

/// Upper bound on attempts for a write that keeps losing transaction races.
const WRITE_ATTEMPTS: u32 = 32;

const LIST_TEXT: &str = "SELECT VALUE value FROM catalog_option WHERE kind = $kind";
const FIND_TEXT: &str = "SELECT <string> id AS id, value FROM catalog_option \
    WHERE kind = $kind AND value = $value LIMIT 1";
const CREATE_TEXT: &str = "CREATE catalog_option CONTENT { kind: $kind, value: $value }";

const LIST_AMOUNTS: &str = "SELECT VALUE value FROM catalog_amount";
const FIND_AMOUNT: &str =
    "SELECT <string> id AS id, value FROM catalog_amount WHERE value = $value LIMIT 1";
const CREATE_AMOUNT: &str = "CREATE catalog_amount CONTENT { value: $value }";

const LIST_EQUIPMENT_ITEMS: &str = "SELECT VALUE items FROM equipment_category";
const FIND_EQUIPMENT_ITEM: &str = "SELECT <string> id AS id, name, items FROM equipment_category \
    WHERE items CONTAINS $value ORDER BY name LIMIT 1";
const FIND_CATEGORY: &str =
    "SELECT <string> id AS id, name, items FROM equipment_category WHERE name = $name LIMIT 1";
const LIST_CATEGORIES: &str = "SELECT <string> id AS id, name, items FROM equipment_category";
const CREATE_CATEGORY: &str = "CREATE equipment_category CONTENT { name: $name, items: [$value] }";
// Matches nothing when the item is already present, so only one writer sees it appended.
const APPEND_ITEM: &str = "UPDATE equipment_category SET items = array::union(items, [$value]) \
    WHERE name = $name AND items CONTAINSNOT $value RETURN name";

#[derive(Debug, SurrealValue)]
struct TextRow {
    id: String,
    value: String,
}

#[derive(Debug, SurrealValue)]
struct AmountRow {
    id: String,
    value: f64,
}

#[derive(Debug, SurrealValue)]
struct CategoryRow {
    id: String,
    name: String,
    items: Vec<String>,
}

#[derive(Debug, SurrealValue)]
struct NameRow {
    name: String,
}

impl From<CategoryRow> for EquipmentCategory {
    fn from(row: CategoryRow) -> Self {
        Self { id: row.id, name: row.name, items: row.items }
    }
}

/// Outcome of a single write statement.
enum Write {
    Applied(IndexedResults),
    Duplicate,
    Conflict,
}

/// [`CatalogStore`] backed by `SurrealDB`.
///
/// Flat kinds live in `catalog_option` (unique on `kind, value`) and `catalog_amount`
/// (unique on `value`). Equipment names are items of the `General` equipment category.
#[derive(Debug, Clone)]
pub struct SurrealCatalogStore {
    db: Database,
}

impl SurrealCatalogStore {
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    async fn write(
        &self,
        query: &'static str,
        bindings: &[(&'static str, BindValue)],
        context: &'static str,
    ) -> Result<Write, CatalogError> {
        let mut request = self.db.query(query);
        for (key, value) in bindings {
            request = match value {
                BindValue::Text(text) => request.bind((*key, text.clone())),
                BindValue::Amount(amount) => request.bind((*key, *amount)),
            };
        }

        match request.await.and_then(IndexedResults::check) {
            Ok(results) => Ok(Write::Applied(results)),
            Err(err) if is_transaction_conflict(&err) => {
                debug!(error = %err, "Write lost a transaction race");
                Ok(Write::Conflict)
            }
            Err(err) if is_unique_violation(&err) => {
                debug!(error = %err, "Unique index rejected write");
                Ok(Write::Duplicate)
            }
            Err(err) => Err(CatalogError::storage(context)(err)),
        }
    }

    async fn list_text(&self, kind: CatalogKind) -> Result<Vec<OptionValue>, CatalogError> {
        let values = self
            .db
            .query(LIST_TEXT)
            .bind(("kind", kind.slug()))
            .await
            .map_err(CatalogError::storage("Listing options"))?
            .take::<Vec<String>>(0)
            .map_err(CatalogError::storage("Parsing options"))?;

        Ok(values.into_iter().map(OptionValue::Text).collect())
    }

    async fn list_amounts(&self) -> Result<Vec<OptionValue>, CatalogError> {
        let values = self
            .db
            .query(LIST_AMOUNTS)
            .await
            .map_err(CatalogError::storage("Listing amounts"))?
            .take::<Vec<f64>>(0)
            .map_err(CatalogError::storage("Parsing amounts"))?;

        Ok(values.into_iter().map(OptionValue::Amount).collect())
    }

    async fn list_equipment_items(&self) -> Result<Vec<OptionValue>, CatalogError> {
        let items = self
            .db
            .query(LIST_EQUIPMENT_ITEMS)
            .await
            .map_err(CatalogError::storage("Listing equipment items"))?
            .take::<Vec<Vec<String>>>(0)
            .map_err(CatalogError::storage("Parsing equipment items"))?;

        Ok(items.into_iter().flatten().map(OptionValue::Text).collect())
    }

    async fn find_text(
        &self,
        kind: CatalogKind,
        value: &str,
    ) -> Result<Option<CatalogEntry>, CatalogError> {
        let row = self
            .db
            .query(FIND_TEXT)
            .bind(("kind", kind.slug()))
            .bind(("value", value.to_owned()))
            .await
            .map_err(CatalogError::storage("Finding option"))?
            .take::<Vec<TextRow>>(0)
            .map_err(CatalogError::storage("Parsing option"))?
            .into_iter()
            .next();

        Ok(row.map(|row| CatalogEntry { id: row.id, kind, value: OptionValue::Text(row.value) }))
    }

    async fn find_amount(&self, amount: f64) -> Result<Option<CatalogEntry>, CatalogError> {
        let row = self
            .db
            .query(FIND_AMOUNT)
            .bind(("value", amount))
            .await
            .map_err(CatalogError::storage("Finding amount"))?
            .take::<Vec<AmountRow>>(0)
            .map_err(CatalogError::storage("Parsing amount"))?
            .into_iter()
            .next();

        Ok(row.map(|row| CatalogEntry {
            id: row.id,
            kind: CatalogKind::Amount,
            value: OptionValue::Amount(row.value),
        }))
    }

    async fn find_equipment_item(&self, item: &str) -> Result<Option<CatalogEntry>, CatalogError> {
        let row = self
            .db
            .query(FIND_EQUIPMENT_ITEM)
            .bind(("value", item.to_owned()))
            .await
            .map_err(CatalogError::storage("Finding equipment item"))?
            .take::<Vec<CategoryRow>>(0)
            .map_err(CatalogError::storage("Parsing equipment category"))?
            .into_iter()
            .next();

        Ok(row.map(|row| CatalogEntry {
            id: row.id,
            kind: CatalogKind::EquipmentName,
            value: OptionValue::Text(item.to_owned()),
        }))
    }

    async fn find_category(&self, name: &str) -> Result<Option<CategoryRow>, CatalogError> {
        Ok(self
            .db
            .query(FIND_CATEGORY)
            .bind(("name", name.to_owned()))
            .await
            .map_err(CatalogError::storage("Finding equipment category"))?
            .take::<Vec<CategoryRow>>(0)
            .map_err(CatalogError::storage("Parsing equipment category"))?
            .into_iter()
            .next())
    }

    /// Adds `item` to the `General` category, creating the category on first use.
    ///
    /// Every caller racing on the category either appends its item, finds it already
    /// present, or retries after a transaction conflict.
    async fn insert_equipment_item(&self, item: String) -> Result<InsertOutcome, CatalogError> {
        let name = GENERAL_EQUIPMENT_CATEGORY;
        let bindings =
            [("name", BindValue::Text(name.to_owned())), ("value", BindValue::Text(item.clone()))];

        for attempt in 1..=WRITE_ATTEMPTS {
            let written = match self.find_category(name).await? {
                Some(category) if category.items.contains(&item) => {
                    return Ok(InsertOutcome::Duplicate);
                }
                Some(_) => {
                    let write = self.write(APPEND_ITEM, &bindings, "Appending equipment item");
                    let Write::Applied(mut results) = write.await? else {
                        backoff(attempt, &item).await;
                        continue;
                    };
                    let appended = results
                        .take::<Vec<NameRow>>(0)
                        .map_err(CatalogError::storage("Parsing equipment append"))?;
                    // Nothing matched: another writer appended the item first.
                    if !appended.iter().any(|row| row.name == name) {
                        return Ok(InsertOutcome::Duplicate);
                    }
                    true
                }
                None => matches!(
                    self.write(CREATE_CATEGORY, &bindings, "Creating equipment category").await?,
                    Write::Applied(_)
                ),
            };

            if written {
                let category = self.find_category(name).await?.ok_or_else(|| CatalogError::Internal {
                    message: format!("Category '{name}' missing after write").into(),
                    context: Some("Inserting equipment item".into()),
                })?;

                return Ok(InsertOutcome::Created(CatalogEntry {
                    id: category.id,
                    kind: CatalogKind::EquipmentName,
                    value: OptionValue::Text(item),
                }));
            }

            backoff(attempt, &item).await;
        }

        Err(exhausted("Inserting equipment item"))
    }

    /// Creates a flat option row. A conflicted create whose value has since appeared is a duplicate.
    async fn insert_flat(
        &self,
        kind: CatalogKind,
        value: &OptionValue,
        query: &'static str,
        bindings: &[(&'static str, BindValue)],
    ) -> Result<InsertOutcome, CatalogError> {
        for attempt in 1..=WRITE_ATTEMPTS {
            match self.write(query, bindings, "Creating option").await? {
                Write::Applied(_) => {
                    let entry = self.find(kind, value).await?.ok_or_else(|| CatalogError::Internal {
                        message: format!("Created {kind} option '{value}' could not be read back")
                            .into(),
                        context: Some("Inserting option".into()),
                    })?;
                    return Ok(InsertOutcome::Created(entry));
                }
                Write::Duplicate => return Ok(InsertOutcome::Duplicate),
                Write::Conflict => {
                    if self.find(kind, value).await?.is_some() {
                        return Ok(InsertOutcome::Duplicate);
                    }
                }
            }

            backoff(attempt, &value.to_string()).await;
        }

        Err(exhausted("Inserting option"))
    }
}

/// Sleeps before retrying a conflicted write: exponential up to 64 ms with jitter.
async fn backoff(attempt: u32, seed: &str) {
    let ceiling = 1_000_u64 << attempt.min(6);
    let jitter = fxhash::hash64(&(seed, attempt, Instant::now())) % ceiling;
    let delay = Duration::from_micros(ceiling / 2 + jitter / 2);
    if attempt > WRITE_ATTEMPTS / 2 {
        warn!(attempt, ?delay, "Catalog write still conflicting, retrying");
    }
    tokio::time::sleep(delay).await;
}

fn exhausted(context: &'static str) -> CatalogError {
    CatalogError::StorageUnavailable {
        message: format!("Write still conflicting after {WRITE_ATTEMPTS} attempts").into(),
        context: Some(context.into()),
    }
}

enum BindValue {
    Text(String),
    Amount(f64),
}

impl From<&OptionValue> for BindValue {
    fn from(value: &OptionValue) -> Self {
        match value {
            OptionValue::Text(text) => Self::Text(text.clone()),
            OptionValue::Amount(amount) => Self::Amount(*amount),
        }
    }
}

impl CatalogStore for SurrealCatalogStore {
    #[instrument(skip(self))]
    async fn list(&self, kind: CatalogKind) -> Result<Vec<OptionValue>, CatalogError> {
        match kind {
            CatalogKind::Amount => self.list_amounts().await,
            CatalogKind::EquipmentName => self.list_equipment_items().await,
            _ => self.list_text(kind).await,
        }
    }

    #[instrument(skip(self))]
    async fn find(
        &self,
        kind: CatalogKind,
        value: &OptionValue,
    ) -> Result<Option<CatalogEntry>, CatalogError> {
        match (kind, value) {
            (CatalogKind::Amount, OptionValue::Amount(amount)) => self.find_amount(*amount).await,
            (CatalogKind::EquipmentName, OptionValue::Text(item)) => {
                self.find_equipment_item(item).await
            }
            (_, OptionValue::Text(text)) if kind != CatalogKind::Amount => {
                self.find_text(kind, text).await
            }
            _ => Err(mismatch(kind, value)),
        }
    }

    #[instrument(skip(self))]
    async fn insert(
        &self,
        kind: CatalogKind,
        value: OptionValue,
    ) -> Result<InsertOutcome, CatalogError> {
        match (kind, &value) {
            (CatalogKind::EquipmentName, OptionValue::Text(item)) => {
                self.insert_equipment_item(item.clone()).await
            }
            (CatalogKind::Amount, OptionValue::Amount(_)) => {
                self.insert_flat(kind, &value, CREATE_AMOUNT, &[("value", BindValue::from(&value))]).await
            }
            (_, OptionValue::Text(_)) if kind != CatalogKind::Amount => {
                let bindings =
                    [("kind", BindValue::Text(kind.slug().to_owned())), ("value", BindValue::from(&value))];
                self.insert_flat(kind, &value, CREATE_TEXT, &bindings).await
            }
            _ => Err(mismatch(kind, &value)),
        }
    }

    #[instrument(skip(self))]
    async fn equipment_categories(&self) -> Result<Vec<EquipmentCategory>, CatalogError> {
        let mut categories: Vec<EquipmentCategory> = self
            .db
            .query(LIST_CATEGORIES)
            .await
            .map_err(CatalogError::storage("Listing equipment categories"))?
            .take::<Vec<CategoryRow>>(0)
            .map_err(CatalogError::storage("Parsing equipment categories"))?
            .into_iter()
            .map(EquipmentCategory::from)
            .collect();

        categories.sort_by_cached_key(|category| (category.name.to_lowercase(), category.name.clone()));
        Ok(categories)
    }
}

fn mismatch(kind: CatalogKind, value: &OptionValue) -> CatalogError {
    CatalogError::Internal {
        message: format!("Value '{value}' does not match the value type of {kind}").into(),
        context: Some("Catalog store".into()),
    }
}
