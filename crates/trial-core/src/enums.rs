//! Trial status enum.
//!
//! Serialized with the variant names as-is (`NotStarted`, `Ongoing`,
//! `Completed`), which is also the form stored in the database.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Lifecycle status of a clinical trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum TrialStatus {
    NotStarted,
    Ongoing,
    Completed,
}

impl TrialStatus {
    pub const ALL: [Self; 3] = [Self::NotStarted, Self::Ongoing, Self::Completed];

    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "NotStarted",
            Self::Ongoing => "Ongoing",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for TrialStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive parse, so `--status ongoing` works from the CLI.
impl FromStr for TrialStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::InvalidStatus(s.to_string()))
    }
}
