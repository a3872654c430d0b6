//! ID prefix constants and generation.
//!
//! Record identifiers are `{prefix}-{16 lowercase hex chars}`.

use std::fmt::Write;

use crate::errors::CoreError;

/// Prefix for server-assigned trial record identifiers.
pub const PREFIX_TRIAL: &str = "trl";

/// Generate a fresh prefixed identifier, e.g. `trl-3fa85f6457174562`.
///
/// # Errors
///
/// Returns `CoreError::Entropy` if the OS random source is unavailable.
pub fn generate(prefix: &str) -> Result<String, CoreError> {
    let mut bytes = [0u8; 8];
    getrandom::fill(&mut bytes).map_err(|e| CoreError::Entropy(e.to_string()))?;
    Ok(bytes
        .iter()
        .fold(format!("{prefix}-"), |mut id, byte| {
            let _ = write!(id, "{byte:02x}");
            id
        }))
}
