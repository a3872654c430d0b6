//! The clinical trial record.
//!
//! One struct serves both directions: it deserializes from an uploaded
//! submission (server-owned fields fall back to their defaults) and serializes
//! as the stored record and the notification payload.

use chrono::{DateTime, FixedOffset, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::TrialStatus;

/// A clinical trial, as submitted and as stored.
///
/// `start_date` and `end_date` keep the offset they were submitted with until
/// the normalizer rewrites them to UTC.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TrialRecord {
    /// Server-assigned identifier (`trl-` plus 16 hex digits). Empty until persisted.
    #[serde(default)]
    pub id: String,

    /// Client-supplied trial identifier, unique across all records.
    pub trial_id: String,

    pub title: String,

    #[serde(deserialize_with = "crate::dates::deserialize")]
    pub start_date: DateTime<FixedOffset>,

    #[serde(default, deserialize_with = "crate::dates::deserialize_option")]
    pub end_date: Option<DateTime<FixedOffset>>,

    /// Number of participants. The schema guarantees `>= 1` when present.
    #[serde(default)]
    pub participants: Option<u32>,

    pub status: TrialStatus,

    /// Derived by the normalizer; never read from a submission.
    #[serde(default)]
    pub duration_in_days: Option<i64>,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Field names of a submission document, in their canonical spelling.
///
/// Used to match incoming keys case-insensitively before deserializing.
pub const SUBMISSION_FIELDS: [&str; 6] = [
    "trialId",
    "title",
    "startDate",
    "endDate",
    "participants",
    "status",
];

impl TrialRecord {
    /// Rewrite top-level keys of a submission to their canonical spelling.
    ///
    /// `{"TRIALID": "T-1"}` becomes `{"trialId": "T-1"}`. Keys that match no
    /// submission field are left untouched.
    #[must_use]
    pub fn canonicalize_keys(document: serde_json::Value) -> serde_json::Value {
        match document {
            serde_json::Value::Object(map) => map
                .into_iter()
                .map(|(key, value)| {
                    let canonical = SUBMISSION_FIELDS
                        .iter()
                        .find(|field| field.eq_ignore_ascii_case(&key))
                        .map_or(key, |field| (*field).to_string());
                    (canonical, value)
                })
                .collect::<serde_json::Map<_, _>>()
                .into(),
            other => other,
        }
    }
}
