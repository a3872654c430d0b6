//! # trial-db
//!
//! libSQL persistence for clinical trial records.
//!
//! `TrialDb` owns the connection and runs migrations on open. Reads go through
//! the trial repository (`repos::trial`); writes are staged on a
//! [`UnitOfWork`] and only hit the database on [`UnitOfWork::commit`].
//!
//! Every unit of work shares one connection, and `SQLite` allows one open
//! transaction per connection. Commits therefore take `write_lock` for the
//! length of their transaction.
//!
//! Uses the `libsql` crate (C `SQLite` fork) in local mode.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod unit_of_work;

use error::DatabaseError;
use libsql::Builder;
use tokio::sync::{Mutex, MutexGuard};

pub use unit_of_work::UnitOfWork;

/// Central database handle for trial state.
pub struct TrialDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    write_lock: Mutex<()>,
}

impl TrialDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        let trial_db = Self {
            db,
            conn,
            write_lock: Mutex::new(()),
        };
        trial_db.run_migrations().await?;
        tracing::debug!(path, "opened trial database");
        Ok(trial_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Wait until no other commit transaction is open on the connection.
    pub(crate) async fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    /// Start a unit of work for one ingestion.
    #[must_use]
    pub const fn unit_of_work(&self) -> UnitOfWork<'_> {
        UnitOfWork::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = TrialDb::open_local(":memory:").await.unwrap();
        let mut rows = db
            .conn()
            .query(
                "SELECT name FROM sqlite_master WHERE type='table' AND name='trials'",
                (),
            )
            .await
            .unwrap();
        assert!(rows.next().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn unique_index_exists() {
        let db = TrialDb::open_local(":memory:").await.unwrap();
        let mut rows = db
            .conn()
            .query(
                "SELECT \"unique\" FROM pragma_index_list('trials') WHERE name = 'idx_trials_trial_id'",
                (),
            )
            .await
            .unwrap();
        let row = rows.next().await.unwrap().expect("index should exist");
        assert_eq!(row.get::<i64>(0).unwrap(), 1);
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let db = TrialDb::open_local(":memory:").await.unwrap();
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn open_file_database() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("trials.db");
        let db = TrialDb::open_local(path.to_str().unwrap()).await.unwrap();
        assert_eq!(db.count_trials().await.unwrap(), 0);
        assert!(path.exists());
    }
}
