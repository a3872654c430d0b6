//! Schema error types.
//!
//! Every variant here is a configuration/deployment defect. A document that
//! fails validation is not an error: it comes back as a `ValidationReport`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    /// Requested schema name does not name any `SchemaKind`.
    #[error("Unknown schema kind: {0}")]
    UnknownKind(String),

    /// The schema definition could not be loaded.
    #[error("Could not load schema definition for {kind}: {reason}")]
    NotFound { kind: String, reason: String },

    /// The schema definition loaded but does not compile.
    #[error("Schema compilation error for {kind}: {reason}")]
    Compilation { kind: String, reason: String },
}
