//! Staged writes for a single ingestion.
//!
//! `add` only queues a record; `commit` inserts everything queued inside one
//! transaction. If any insert fails the transaction is rolled back and the
//! queue is kept, so nothing is half-written. Commits from different units of
//! work on the same `TrialDb` run one after another.

use trial_core::entities::TrialRecord;

use crate::TrialDb;
use crate::error::DatabaseError;
use crate::repos::trial::insert_trial;

/// Per-ingestion write buffer over a shared [`TrialDb`].
pub struct UnitOfWork<'db> {
    db: &'db TrialDb,
    pending: Vec<TrialRecord>,
}

impl<'db> UnitOfWork<'db> {
    pub(crate) const fn new(db: &'db TrialDb) -> Self {
        Self {
            db,
            pending: Vec::new(),
        }
    }

    /// The database this unit of work writes to.
    #[must_use]
    pub const fn db(&self) -> &'db TrialDb {
        self.db
    }

    /// Queue a record for the next commit.
    pub fn add(&mut self, trial: TrialRecord) -> &TrialRecord {
        self.pending.push(trial);
        &self.pending[self.pending.len() - 1]
    }

    /// Records queued since the last successful commit.
    #[must_use]
    pub fn pending(&self) -> &[TrialRecord] {
        &self.pending
    }

    /// Insert all queued records in one transaction.
    ///
    /// Returns the number of records written.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Conflict` if a queued trial identifier already
    /// exists, or another `DatabaseError` if the transaction fails.
    pub async fn commit(&mut self) -> Result<usize, DatabaseError> {
        if self.pending.is_empty() {
            return Ok(0);
        }

        let _writer = self.db.lock_writes().await;
        let tx = self.db.conn().transaction().await?;
        for trial in &self.pending {
            if let Err(e) = insert_trial(&tx, trial).await {
                tracing::debug!(trial_id = %trial.trial_id, error = %e, "rolling back trial insert");
                tx.rollback().await?;
                return Err(e);
            }
        }
        tx.commit().await?;

        let written = self.pending.len();
        self.pending.clear();
        Ok(written)
    }
}
