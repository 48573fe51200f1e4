//! Admin dashboard aggregation.

use serde::Serialize;

use crate::roles::{ROLE_ADMIN, ROLE_INSTRUCTOR, ROLE_STUDENT};

/// Number of courses in the "popular courses" ranking.
pub const POPULAR_COURSES_LIMIT: i64 = 5;

/// Number of users in the "recent users" list.
pub const RECENT_USERS_LIMIT: i64 = 5;

/// User counts per role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RoleCounts {
    pub students: i64,
    pub instructors: i64,
    pub admins: i64,
}

impl RoleCounts {
    /// Tally `(role, count)` rows from a `GROUP BY role` query.
    ///
    /// Unknown roles are ignored; repeated roles are summed.
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = (&'a str, i64)>) -> Self {
        rows.into_iter()
            .fold(Self::default(), |mut acc, (role, count)| {
                match role {
                    ROLE_STUDENT => acc.students += count,
                    ROLE_INSTRUCTOR => acc.instructors += count,
                    ROLE_ADMIN => acc.admins += count,
                    _ => {}
                }
                acc
            })
    }

    pub fn total(&self) -> i64 {
        self.students + self.instructors + self.admins
    }
}

/// Headline counters shown on the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardTotals {
    pub total_users: i64,
    pub total_students: i64,
    pub total_instructors: i64,
    pub total_admins: i64,
    pub total_courses: i64,
    pub published_courses: i64,
    /// Sum of `enrollment_count` over all courses.
    pub total_enrollments: i64,
}

impl DashboardTotals {
    pub fn new(
        roles: RoleCounts,
        total_courses: i64,
        published_courses: i64,
        total_enrollments: i64,
    ) -> Self {
        Self {
            total_users: roles.total(),
            total_students: roles.students,
            total_instructors: roles.instructors,
            total_admins: roles.admins,
            total_courses,
            published_courses,
            total_enrollments,
        }
    }
}
