//! Input validation for sealcast operations.
//!
//! Validates identity ids and key file permissions.

use crate::core::constants::MAX_IDENTITY_LEN;
use crate::error::{Result, StoreError};

/// Validate an identity id.
///
/// Identity ids double as directory names in the filesystem store, so they
/// are restricted to:
/// - ASCII letters, digits, `-`, `_`, `.` and `@`
/// - At most 128 characters
/// - Not empty and not starting with `.`
///
/// # Errors
///
/// Returns `StoreError::InvalidIdentity` if the id is invalid.
pub fn validate_identity(identity: &str) -> Result<()> {
    let invalid = |reason: String| -> crate::error::Error {
        StoreError::InvalidIdentity {
            identity: identity.to_string(),
            reason,
        }
        .into()
    };

    if identity.is_empty() {
        return Err(invalid("cannot be empty".to_string()));
    }

    if identity.len() > MAX_IDENTITY_LEN {
        return Err(invalid(format!(
            "longer than {} characters",
            MAX_IDENTITY_LEN
        )));
    }

    if identity.starts_with('.') {
        return Err(invalid("cannot start with '.'".to_string()));
    }

    for (i, ch) in identity.chars().enumerate() {
        if !ch.is_ascii_alphanumeric() && !matches!(ch, '-' | '_' | '.' | '@') {
            return Err(invalid(format!(
                "invalid character '{}' at position {}. Only A-Z, a-z, 0-9, '-', '_', '.' and '@' are allowed",
                ch,
                i + 1
            )));
        }
    }

    Ok(())
}

/// Validate file permissions (Unix only).
///
/// Checks that a file has the expected permissions mode.
///
/// # Errors
///
/// Returns `StoreError::InsecurePermissions` if permissions don't match.
#[cfg(unix)]
pub fn validate_file_permissions(path: &std::path::Path, expected_mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = std::fs::metadata(path)?;
    let actual_mode = metadata.permissions().mode() & 0o777;

    if actual_mode != expected_mode {
        return Err(StoreError::InsecurePermissions {
            path: path.display().to_string(),
            expected: format!("{:o}", expected_mode),
            actual: format!("{:o}", actual_mode),
        }
        .into());
    }

    Ok(())
}
