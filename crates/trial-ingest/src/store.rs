//! The persistence gateway the pipeline writes through.
//!
//! `TrialStore` is implemented for `trial_db::UnitOfWork`; tests use
//! in-memory fakes.

use std::fmt;

use trial_core::entities::TrialRecord;
use trial_db::UnitOfWork;
use trial_db::error::DatabaseError;

/// Lookup, staging, and commit for one ingestion.
///
/// The store's own uniqueness constraint on the trial identifier is the
/// authoritative duplicate guard: a racing insert must fail `commit`.
#[allow(async_fn_in_trait)]
pub trait TrialStore {
    type Error: fmt::Display;

    /// Existing record with this trial identifier, if any.
    async fn find_by_trial_id(&self, trial_id: &str) -> Result<Option<TrialRecord>, Self::Error>;

    /// Stage a record for the next commit.
    fn add(&mut self, trial: TrialRecord) -> Result<(), Self::Error>;

    /// Make staged records durable.
    async fn commit(&mut self) -> Result<(), Self::Error>;
}

impl TrialStore for UnitOfWork<'_> {
    type Error = DatabaseError;

    async fn find_by_trial_id(&self, trial_id: &str) -> Result<Option<TrialRecord>, Self::Error> {
        self.db().find_by_trial_id(trial_id).await
    }

    fn add(&mut self, trial: TrialRecord) -> Result<(), Self::Error> {
        Self::add(self, trial);
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), Self::Error> {
        Self::commit(self).await.map(|_| ())
    }
}
