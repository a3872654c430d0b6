//! Event sink configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EventsConfig {
    /// When set, `TrialCreated` notifications are also appended as JSON lines
    /// to `{trail_dir}/trials.jsonl`.
    #[serde(default)]
    pub trail_dir: Option<PathBuf>,
}

impl EventsConfig {
    #[must_use]
    pub const fn has_trail(&self) -> bool {
        self.trail_dir.is_some()
    }
}
