//! Well-known role name constants.
//!
//! These must match the `CHECK` constraint on `users.role` in
//! `20250101000001_create_users_table.sql`.

use crate::error::CoreError;

pub const ROLE_STUDENT: &str = "student";
pub const ROLE_INSTRUCTOR: &str = "instructor";
pub const ROLE_ADMIN: &str = "admin";

/// Every role a user row may carry.
pub const VALID_ROLES: &[&str] = &[ROLE_STUDENT, ROLE_INSTRUCTOR, ROLE_ADMIN];

/// Roles a visitor may pick for themselves at registration.
///
/// Admin accounts are only created by promoting an existing user.
pub const SELF_SERVICE_ROLES: &[&str] = &[ROLE_STUDENT, ROLE_INSTRUCTOR];

/// Validate that a role string is one of [`VALID_ROLES`].
pub fn validate_role(role: &str) -> Result<(), CoreError> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        )))
    }
}

/// Validate the role requested on the public registration form.
pub fn validate_registration_role(role: &str) -> Result<(), CoreError> {
    validate_role(role)?;
    if SELF_SERVICE_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Role '{role}' cannot be chosen at registration"
        )))
    }
}

/// Whether the role may author and manage courses.
pub fn can_create_courses(role: &str) -> bool {
    role == ROLE_INSTRUCTOR || role == ROLE_ADMIN
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn known_roles_are_valid() {
        for role in VALID_ROLES {
            assert!(validate_role(role).is_ok(), "{role} should be valid");
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert_matches!(validate_role("superuser"), Err(CoreError::Validation(_)));
        // Role names are case-sensitive.
        assert_matches!(validate_role("Admin"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn admin_cannot_self_register() {
        assert!(validate_registration_role(ROLE_STUDENT).is_ok());
        assert!(validate_registration_role(ROLE_INSTRUCTOR).is_ok());
        assert_matches!(
            validate_registration_role(ROLE_ADMIN),
            Err(CoreError::Validation(msg)) if msg.contains("registration")
        );
    }

    #[test]
    fn course_authoring_roles() {
        assert!(can_create_courses(ROLE_INSTRUCTOR));
        assert!(can_create_courses(ROLE_ADMIN));
        assert!(!can_create_courses(ROLE_STUDENT));
    }
}
