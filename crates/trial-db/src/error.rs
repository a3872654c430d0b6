//! Database error types for trial-db.

use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed or returned data that could not be parsed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// The unique index on `trial_id` rejected an insert.
    #[error("Trial with ID '{0}' already exists")]
    Conflict(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),
}

impl DatabaseError {
    /// Detect a unique-constraint violation on `trials.trial_id`.
    ///
    /// libSQL only exposes the `SQLite` message text, so this matches on it.
    /// A primary-key collision is not a `Conflict`.
    #[must_use]
    pub fn is_trial_id_conflict(e: &libsql::Error) -> bool {
        let msg = e.to_string();
        msg.contains("UNIQUE constraint failed") && msg.contains("trials.trial_id")
    }
}
