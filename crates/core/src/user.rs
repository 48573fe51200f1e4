//! User profile constraints.

use crate::error::CoreError;

/// Minimum length of a display name, in characters.
pub const MIN_NAME_LENGTH: usize = 2;

/// Maximum length of a display name, in characters.
pub const MAX_NAME_LENGTH: usize = 50;

/// Validate a display name after trimming surrounding whitespace.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    let len = name.trim().chars().count();
    if len < MIN_NAME_LENGTH || len > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Name must be between {MIN_NAME_LENGTH} and {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Canonical form of an email address: trimmed and lower-cased.
///
/// Emails are unique case-insensitively, so every lookup and write goes
/// through this function.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Account status filter value for active users.
pub const STATUS_ACTIVE: &str = "active";

/// Account status filter value for deactivated users.
pub const STATUS_INACTIVE: &str = "inactive";
