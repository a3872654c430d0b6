//! Checks on an upload that run before its content is read.

use trial_config::UploadConfig;

use crate::error::UploadError;

/// Reject empty, oversized, or non-JSON uploads.
///
/// The name must end in `.` plus the allowed extension, ignoring case. A bare
/// `.json` qualifies.
///
/// # Errors
///
/// Returns the first `UploadError` that applies, checked in the order:
/// empty, too large, wrong extension.
pub fn check_upload(file_name: &str, len: u64, config: &UploadConfig) -> Result<(), UploadError> {
    if len == 0 {
        return Err(UploadError::Empty);
    }
    if len > config.max_bytes {
        return Err(UploadError::TooLarge {
            max_bytes: config.max_bytes,
        });
    }
    let suffix = format!(".{}", config.allowed_extension.to_ascii_lowercase());
    let extension_ok = file_name.to_ascii_lowercase().ends_with(&suffix);
    if !extension_ok {
        return Err(UploadError::WrongExtension);
    }
    Ok(())
}
