//! Ingestion of one uploaded trial document.
//!
//! ```text
//! read -> validate -> parse -> duplicate check -> normalize -> persist -> publish
//! ```
//!
//! Steps up to and including persistence short-circuit into
//! `Outcome::Rejected`. Only a broken schema escapes as `IngestError`.
//! Publishing runs synchronously right after the commit returns, so once a
//! trial is stored there is no await point at which the notification can be
//! cancelled.

use std::sync::Arc;

use chrono::Utc;
use tokio::io::{AsyncRead, AsyncReadExt};
use trial_core::entities::TrialRecord;
use trial_core::events::TrialCreated;
use trial_core::ids::{self, PREFIX_TRIAL};
use trial_schema::{SchemaKind, SchemaValidator};

use crate::error::IngestError;
use crate::normalize::normalize;
use crate::outcome::Outcome;
use crate::sink::EventSink;
use crate::store::TrialStore;

/// Upper bound on the buffer reserved up front from a declared length.
const MAX_PREALLOC: usize = 1024 * 1024;

/// Validates, normalizes, stores, and announces trial submissions.
///
/// Holds no per-ingestion state; one instance can serve any number of
/// concurrent ingestions, each with its own store.
pub struct IngestionPipeline<E> {
    validator: Arc<SchemaValidator>,
    sink: E,
}

impl<E: EventSink> IngestionPipeline<E> {
    #[must_use]
    pub const fn new(validator: Arc<SchemaValidator>, sink: E) -> Self {
        Self { validator, sink }
    }

    /// Read a document from `reader` and ingest it.
    ///
    /// `byte_length` is the declared size, used only to size the read buffer.
    ///
    /// # Errors
    ///
    /// Returns `IngestError::Configuration` if the `ClinicalTrial` schema
    /// cannot be loaded. Everything else is reported through `Outcome`.
    pub async fn ingest<S, R>(
        &self,
        store: &mut S,
        mut reader: R,
        byte_length: u64,
    ) -> Result<Outcome, IngestError>
    where
        S: TrialStore,
        R: AsyncRead + Unpin,
    {
        let capacity = usize::try_from(byte_length).map_or(MAX_PREALLOC, |n| n.min(MAX_PREALLOC));
        let mut raw = Vec::with_capacity(capacity);
        if let Err(e) = reader.read_to_end(&mut raw).await {
            return Ok(reject(Outcome::processing_error(e)));
        }
        self.ingest_bytes(store, &raw).await
    }

    /// Ingest a document already in memory.
    ///
    /// # Errors
    ///
    /// Same as [`Self::ingest`].
    pub async fn ingest_bytes<S: TrialStore>(
        &self,
        store: &mut S,
        raw: &[u8],
    ) -> Result<Outcome, IngestError> {
        tracing::debug!(bytes = raw.len(), "validating trial document");
        let report = self.validator.validate(raw, SchemaKind::ClinicalTrial)?;
        if !report.is_valid() {
            return Ok(reject(Outcome::invalid_format(&report.errors)));
        }

        tracing::debug!("parsing trial document");
        let trial = match parse(raw) {
            Ok(Some(trial)) => trial,
            Ok(None) => return Ok(reject(Outcome::deserialize_failed())),
            Err(e) => return Ok(reject(Outcome::parsing_error(e))),
        };

        tracing::debug!(trial_id = %trial.trial_id, "checking for duplicate trial");
        match store.find_by_trial_id(&trial.trial_id).await {
            Ok(Some(_)) => return Ok(reject(Outcome::duplicate(&trial.trial_id))),
            Ok(None) => {}
            Err(e) => return Ok(reject(Outcome::processing_error(e))),
        }

        let mut trial = normalize(trial);
        if trial.duration_in_days.is_some_and(|days| days < 0) {
            tracing::warn!(
                trial_id = %trial.trial_id,
                duration_in_days = ?trial.duration_in_days,
                "trial ends before it starts"
            );
        }

        trial.id = match ids::generate(PREFIX_TRIAL) {
            Ok(id) => id,
            Err(e) => return Ok(reject(Outcome::processing_error(e))),
        };
        trial.created_at = Utc::now();

        tracing::debug!(id = %trial.id, trial_id = %trial.trial_id, "persisting trial");
        if let Err(e) = store.add(trial.clone()) {
            return Ok(reject(Outcome::processing_error(e)));
        }
        if let Err(e) = store.commit().await {
            return Ok(reject(Outcome::processing_error(e)));
        }

        let id = trial.id.clone();
        if let Err(e) = self.sink.publish(&TrialCreated::now(trial)) {
            tracing::warn!(%id, error = %e, "trial stored but TrialCreated was not delivered");
        }

        tracing::info!(%id, "trial created");
        Ok(Outcome::Created(id))
    }
}

/// Second pass over the document: keys matched case-insensitively, then
/// deserialized. `null` yields `Ok(None)`.
fn parse(raw: &[u8]) -> Result<Option<TrialRecord>, serde_json::Error> {
    let document: serde_json::Value = serde_json::from_slice(raw)?;
    serde_json::from_value(TrialRecord::canonicalize_keys(document))
}

fn reject(outcome: Outcome) -> Outcome {
    if let Some(reason) = outcome.reason() {
        tracing::warn!(reason, "trial rejected");
    }
    outcome
}
