//! Schema kinds and where their definitions come from.
//!
//! `ClinicalTrial` is a hand-written, embedded definition of the upload
//! document. The other kinds are generated from `trial-core` types with
//! [`schemars::schema_for!`].

use std::fmt;
use std::str::FromStr;

use schemars::schema_for;

use crate::error::SchemaError;

const CLINICAL_TRIAL_SCHEMA: &str = include_str!("../schemas/clinicaltrial-schema.json");

/// Selects which structural ruleset a document is validated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SchemaKind {
    /// An uploaded trial submission (closed schema).
    ClinicalTrial,
    /// A stored trial record, generated from `TrialRecord`.
    TrialRecord,
    /// A `TrialCreated` notification, generated from `TrialCreated`.
    TrialCreated,
}

impl SchemaKind {
    pub const ALL: [Self; 3] = [Self::ClinicalTrial, Self::TrialRecord, Self::TrialCreated];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ClinicalTrial => "clinicaltrial",
            Self::TrialRecord => "trial_record",
            Self::TrialCreated => "trial_created",
        }
    }

    /// Load this kind's schema definition.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the definition cannot be produced as
    /// JSON (a corrupt embedded file or a non-serializable generated schema).
    pub fn definition(self) -> Result<serde_json::Value, SchemaError> {
        let not_found = |e: serde_json::Error| SchemaError::NotFound {
            kind: self.to_string(),
            reason: e.to_string(),
        };
        match self {
            Self::ClinicalTrial => serde_json::from_str(CLINICAL_TRIAL_SCHEMA).map_err(not_found),
            Self::TrialRecord => {
                serde_json::to_value(schema_for!(trial_core::entities::TrialRecord))
                    .map_err(not_found)
            }
            Self::TrialCreated => {
                serde_json::to_value(schema_for!(trial_core::events::TrialCreated))
                    .map_err(not_found)
            }
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaKind {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| SchemaError::UnknownKind(s.to_string()))
    }
}
