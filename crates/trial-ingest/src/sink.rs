//! Where `TrialCreated` notifications go.
//!
//! Publishing happens after the commit and is best-effort: the pipeline logs a
//! failed publish and still reports the trial as created.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use trial_core::events::TrialCreated;
use trial_schema::{SchemaKind, SchemaValidator};

use crate::error::SinkError;

/// File name of the JSON-lines event trail inside its directory.
pub const TRAIL_FILE: &str = "trials.jsonl";

/// Receives a notification for every committed trial.
pub trait EventSink {
    /// Deliver one notification.
    ///
    /// # Errors
    ///
    /// Returns `SinkError` if the notification could not be delivered.
    fn publish(&self, event: &TrialCreated) -> Result<(), SinkError>;
}

/// Logs each notification at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn publish(&self, event: &TrialCreated) -> Result<(), SinkError> {
        tracing::info!(
            id = %event.trial.id,
            "Clinical trial created: {} - {} at {}",
            event.trial.trial_id,
            event.trial.title,
            event.occurred_at.to_rfc3339()
        );
        Ok(())
    }
}

/// Appends each notification as one JSON line to `{trail_dir}/trials.jsonl`.
///
/// The payload is checked against the `TrialCreated` schema first. A mismatch
/// is logged as a warning and the line is written anyway.
pub struct JsonlSink {
    path: PathBuf,
    validator: Arc<SchemaValidator>,
}

impl JsonlSink {
    /// Create a sink writing under `trail_dir`, creating the directory.
    ///
    /// # Errors
    ///
    /// Returns `SinkError::Io` if the directory cannot be created.
    pub fn new(trail_dir: &Path, validator: Arc<SchemaValidator>) -> Result<Self, SinkError> {
        std::fs::create_dir_all(trail_dir)?;
        Ok(Self {
            path: trail_dir.join(TRAIL_FILE),
            validator,
        })
    }

    /// The trail file this sink appends to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventSink for JsonlSink {
    fn publish(&self, event: &TrialCreated) -> Result<(), SinkError> {
        let payload = serde_json::to_value(event)?;
        match self.validator.validate_value(&payload, SchemaKind::TrialCreated) {
            Ok(report) if !report.is_valid() => tracing::warn!(
                trial_id = %event.trial.trial_id,
                errors = ?report.errors,
                "TrialCreated payload does not match its schema"
            ),
            Err(e) => tracing::warn!(error = %e, "TrialCreated schema unavailable"),
            Ok(_) => {}
        }

        serde_jsonlines::append_json_lines(&self.path, [&payload])?;
        Ok(())
    }
}

/// Publishes to every sink in order. All sinks are tried; the first error is
/// returned.
impl EventSink for Vec<Box<dyn EventSink + Send + Sync>> {
    fn publish(&self, event: &TrialCreated) -> Result<(), SinkError> {
        let mut first_error = None;
        for sink in self {
            if let Err(e) = sink.publish(event) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
