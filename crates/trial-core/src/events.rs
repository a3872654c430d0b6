//! Notifications emitted by the ingestion pipeline.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::TrialRecord;

/// Published once a new trial has been committed.
///
/// Carries the full normalized record as stored.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TrialCreated {
    pub trial: TrialRecord,
    pub occurred_at: DateTime<Utc>,
}

impl TrialCreated {
    /// Wrap a committed record, stamping the current time.
    #[must_use]
    pub fn now(trial: TrialRecord) -> Self {
        Self {
            trial,
            occurred_at: Utc::now(),
        }
    }
}
