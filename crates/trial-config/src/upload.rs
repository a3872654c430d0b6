//! Upload pre-check limits.

use serde::{Deserialize, Serialize};

/// 1 MiB.
const fn default_max_bytes() -> u64 {
    1024 * 1024
}

fn default_allowed_extension() -> String {
    "json".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadConfig {
    /// Largest accepted upload, in bytes.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,

    /// Required file extension, compared case-insensitively, without the dot.
    #[serde(default = "default_allowed_extension")]
    pub allowed_extension: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
            allowed_extension: default_allowed_extension(),
        }
    }
}
