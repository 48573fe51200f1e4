//! Enrollment and course-ownership rules.
//!
//! The enrollment set of a course is the authoritative side of the
//! user/course relation. The repository applies set-add and set-remove
//! atomically and reports whether the set actually changed; these functions
//! turn that outcome into the domain error the caller sees.

use crate::error::CoreError;
use crate::roles::ROLE_ADMIN;
use crate::types::DbId;

/// Outcome of an atomic set-add or set-remove on a course's enrollment set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipChange {
    /// The row was inserted or removed.
    Applied,
    /// The set already had (or already lacked) the member.
    Unchanged,
}

impl MembershipChange {
    /// Build from the number of rows touched by the insert/delete.
    pub fn from_rows_affected(rows: u64) -> Self {
        if rows > 0 {
            Self::Applied
        } else {
            Self::Unchanged
        }
    }
}

/// An enroll that did not add a row means the student was already present.
pub fn ensure_enrolled_now(change: MembershipChange) -> Result<(), CoreError> {
    match change {
        MembershipChange::Applied => Ok(()),
        MembershipChange::Unchanged => Err(CoreError::Conflict(
            "Already enrolled in this course".to_string(),
        )),
    }
}

/// An unenroll that did not remove a row means the student was never present.
pub fn ensure_unenrolled_now(change: MembershipChange) -> Result<(), CoreError> {
    match change {
        MembershipChange::Applied => Ok(()),
        MembershipChange::Unchanged => Err(CoreError::NotEnrolled(
            "Not enrolled in this course".to_string(),
        )),
    }
}

/// Only the owning instructor or an admin may modify or delete a course.
pub fn ensure_can_manage_course(
    requester_id: DbId,
    requester_role: &str,
    instructor_id: DbId,
) -> Result<(), CoreError> {
    if requester_id == instructor_id || requester_role == ROLE_ADMIN {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "Not authorized to manage this course".to_string(),
        ))
    }
}

/// Number of enrolled students, as cached on the course row.
///
/// The cache is always recomputed from the set, never incremented, so a
/// missed update cannot accumulate drift.
pub fn enrollment_count(members: i64) -> i32 {
    i32::try_from(members).unwrap_or(i32::MAX)
}
