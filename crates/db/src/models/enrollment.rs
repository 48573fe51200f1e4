//! Enrollment receipts.

use coursehub_core::types::DbId;
use serde::Serialize;

/// Result of a successful enroll or unenroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EnrollmentReceipt {
    pub course_id: DbId,
    pub user_id: DbId,
    /// The course's enrollment count after the change.
    pub enrollment_count: i32,
}
