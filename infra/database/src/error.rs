use std::borrow::Cow;
use surrealdb::types::QueryError;

/// A specialized [`DatabaseError`] enum of this crate.
#[stagehand_derive::stagehand_error]
pub enum DatabaseError {
    /// Validation errors.
    #[error("Validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Occurs when connectivity or health checks fail.
    #[error("Database connection failed{}: {message}", format_context(.context))]
    Connection { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Occurs when authentication fails.
    #[error("Authentication failed{}: {message}", format_context(.context))]
    Auth { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A wrapper for underlying `SurrealDB` engine errors.
    #[error("SurrealDB error{}: {source}", format_context(.context))]
    Surreal {
        #[source]
        source: surrealdb::Error,
        context: Option<Cow<'static, str>>,
    },

    /// Migration failures or invariant violations.
    #[error("Migration error{}: {message}", format_context(.context))]
    Migration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal database error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Whether a `SurrealDB` error reports a record id or unique index collision.
///
/// Index collisions carry no structured details; the engine reports them as
/// `Database index ... already contains ...`.
#[must_use]
pub fn is_unique_violation(err: &surrealdb::Error) -> bool {
    if err.is_already_exists() {
        return true;
    }
    let message = err.to_string();
    message.contains("already exists") || message.contains("already contains")
}

/// Whether a statement lost an optimistic transaction race and can be retried.
///
/// Embedded engines attach [`QueryError::TransactionConflict`]; errors relayed
/// without details still carry the engine's `Transaction conflict` text.
#[must_use]
pub fn is_transaction_conflict(err: &surrealdb::Error) -> bool {
    matches!(err.query_details(), Some(QueryError::TransactionConflict))
        || err.to_string().contains("Transaction conflict")
}
