//! Error types for trial-ingest.
//!
//! Only [`IngestError`] escapes `IngestionPipeline::ingest`; every problem with
//! the submitted document is an `Outcome::Rejected` instead.

use thiserror::Error;

/// A deployment defect that stops ingestion outright.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The schema the pipeline depends on is missing or broken.
    #[error("Schema configuration error: {0}")]
    Configuration(#[from] trial_schema::SchemaError),
}

/// Failure to deliver a notification. Logged, never propagated.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Event trail write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Event serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// An upload rejected before its content is read.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("File cannot be empty")]
    Empty,

    #[error("File size must not exceed {max_bytes} bytes")]
    TooLarge { max_bytes: u64 },

    #[error("Only JSON files are accepted")]
    WrongExtension,
}
