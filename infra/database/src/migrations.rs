use crate::error::{DatabaseError, DatabaseErrorExt};
use fxhash::FxHashMap;
use sha2::{Digest, Sha256};
use surrealdb::Surreal;
use surrealdb::engine::any::Any;
use surrealdb::types::SurrealValue;

/// Bookkeeping table for applied migrations; installed before anything else runs.
const BOOTSTRAP: &str = "
    DEFINE TABLE IF NOT EXISTS migration SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS migration_slice_version ON migration FIELDS slice, version UNIQUE;
";

/// A versioned `SurrealQL` script owned by a feature slice.
///
/// Scripts are embedded at compile time (usually with `include_str!`) and applied
/// once, in registration order, inside a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Migration {
    pub slice: &'static str,
    pub version: &'static str,
    pub script: &'static str,
}

impl Migration {
    #[must_use]
    pub const fn new(slice: &'static str, version: &'static str, script: &'static str) -> Self {
        Self { slice, version, script }
    }

    /// Hex-encoded SHA-256 of the script.
    #[must_use]
    pub fn checksum(&self) -> String {
        hex::encode(Sha256::digest(self.script.as_bytes()))
    }

    fn key(&self) -> String {
        format!("{}:{}", self.slice, self.version)
    }

    fn to_applied(self) -> AppliedMigration {
        AppliedMigration {
            slice: self.slice.to_owned(),
            version: self.version.to_owned(),
            checksum: self.checksum(),
        }
    }
}

/// Outcome of a [`MigrationRunner::run`] pass.
#[derive(Debug, Default)]
pub struct MigrationReport {
    pub applied: Vec<AppliedMigration>,
    pub skipped: Vec<AppliedMigration>,
}

#[derive(Debug, Clone, SurrealValue)]
pub struct AppliedMigration {
    pub slice: String,
    pub version: String,
    pub checksum: String,
}

#[derive(Debug)]
pub(crate) struct MigrationRunner {
    db: Surreal<Any>,
}

impl MigrationRunner {
    #[must_use]
    pub(crate) const fn new(db: Surreal<Any>) -> Self {
        Self { db }
    }

    pub(crate) async fn run(&self, migrations: &[Migration]) -> Result<MigrationReport, DatabaseError> {
        self.db
            .query(BOOTSTRAP)
            .await
            .context("Installing migration table")?
            .check()
            .map_err(surrealdb::Error::from)
            .context("Installing migration table")?;

        let applied = self.applied_migrations().await?;
        let mut report = MigrationReport::default();

        for migration in migrations {
            if let Some(existing) = applied.get(&migration.key()) {
                ensure_checksum_match(migration, &existing.checksum)?;
                report.skipped.push(migration.to_applied());
                continue;
            }

            self.apply(migration).await?;
            report.applied.push(migration.to_applied());
        }

        Ok(report)
    }

    async fn apply(&self, migration: &Migration) -> Result<(), DatabaseError> {
        let query = format!(
            "BEGIN TRANSACTION;
            {}
            CREATE migration CONTENT {{
                slice: $slice,
                version: $version,
                checksum: $checksum,
                applied_at: time::now()
            }};
            COMMIT TRANSACTION;",
            migration.script,
        );

        self.db
            .query(&query)
            .bind(("slice", migration.slice))
            .bind(("version", migration.version))
            .bind(("checksum", migration.checksum()))
            .await
            .context(format!("SQL execution failed at {}", migration.key()))?
            .check()
            .map_err(surrealdb::Error::from)
            .context(format!("Migration {} rejected", migration.key()))?;

        Ok(())
    }

    async fn applied_migrations(
        &self,
    ) -> Result<FxHashMap<String, AppliedMigration>, DatabaseError> {
        let entries = self
            .db
            .query("SELECT slice, version, checksum FROM migration")
            .await
            .context("Loading applied migrations")?
            .take::<Vec<AppliedMigration>>(0)
            .context("Parsing applied migrations")?;

        Ok(entries
            .into_iter()
            .map(|entry| (format!("{}:{}", entry.slice, entry.version), entry))
            .collect())
    }
}

fn ensure_checksum_match(migration: &Migration, existing: &str) -> Result<(), DatabaseError> {
    let expected = migration.checksum();
    if existing != expected {
        return Err(DatabaseError::Migration {
            message: format!(
                "Checksum mismatch for {} (recorded {existing}, embedded {expected})",
                migration.key()
            )
            .into(),
            context: Some("Migration already applied with different script".into()),
        });
    }
    Ok(())
}
