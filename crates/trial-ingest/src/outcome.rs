//! The two-variant result of one ingestion attempt.

use std::fmt;

pub const INVALID_FORMAT_PREFIX: &str = "Invalid JSON format: ";
pub const PARSING_ERROR_PREFIX: &str = "JSON parsing error: ";
pub const PROCESSING_ERROR_PREFIX: &str = "Processing error: ";
pub const DESERIALIZE_FAILED: &str = "Failed to deserialize trial data";

/// What happened to a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Stored under this server-assigned identifier.
    Created(String),
    /// Not stored. Carries a human-readable reason.
    Rejected(String),
}

impl Outcome {
    /// Schema validation failed.
    #[must_use]
    pub fn invalid_format(errors: &[String]) -> Self {
        Self::Rejected(format!("{INVALID_FORMAT_PREFIX}{}", errors.join(", ")))
    }

    /// The document passed the schema but could not be deserialized.
    pub fn parsing_error(error: impl fmt::Display) -> Self {
        Self::Rejected(format!("{PARSING_ERROR_PREFIX}{error}"))
    }

    /// Deserialization produced no record.
    #[must_use]
    pub fn deserialize_failed() -> Self {
        Self::Rejected(DESERIALIZE_FAILED.to_string())
    }

    /// The trial identifier is already stored.
    #[must_use]
    pub fn duplicate(trial_id: &str) -> Self {
        Self::Rejected(format!("Trial with ID '{trial_id}' has already been uploaded"))
    }

    /// Reading, lookup, or persistence failed.
    pub fn processing_error(error: impl fmt::Display) -> Self {
        Self::Rejected(format!("{PROCESSING_ERROR_PREFIX}{error}"))
    }

    #[must_use]
    pub const fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    /// The assigned identifier, if created.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Created(id) => Some(id),
            Self::Rejected(_) => None,
        }
    }

    /// The rejection reason, if rejected.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Created(_) => None,
            Self::Rejected(reason) => Some(reason),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created(id) => write!(f, "created {id}"),
            Self::Rejected(reason) => write!(f, "rejected: {reason}"),
        }
    }
}
