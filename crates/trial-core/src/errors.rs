//! Cross-cutting error types.
//!
//! Domain-specific errors (`SchemaError`, `DatabaseError`, ...) live in their
//! own crates. The CLI converges everything into `anyhow::Error`.

use thiserror::Error;

/// Errors that can be raised by any trial crate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A date string matched none of the accepted forms.
    #[error("Invalid date '{0}': expected YYYY-MM-DD or an ISO 8601 date-time")]
    InvalidDate(String),

    /// A status string is not one of the enumerated values.
    #[error("Invalid trial status '{0}': expected NotStarted, Ongoing or Completed")]
    InvalidStatus(String),

    /// The OS random source failed while generating an identifier.
    #[error("Could not generate identifier: {0}")]
    Entropy(String),
}
