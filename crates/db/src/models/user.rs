//! User entity model and DTOs.

use coursehub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
    pub profile_picture: Option<String>,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub profile_picture: Option<String>,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            is_active: user.is_active,
            profile_picture: user.profile_picture.clone(),
            last_login_at: user.last_login_at,
            created_at: user.created_at,
        }
    }
}

/// Id and title of a course linked to a user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CourseRef {
    pub id: DbId,
    pub title: String,
}

/// The user's side of the user/course relation.
///
/// Both lists are derived from the course side (`course_enrollments` and
/// `courses.instructor_id`) on every read; nothing here is stored.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserCourseLinks {
    pub enrolled_courses: Vec<CourseRef>,
    pub created_courses: Vec<CourseRef>,
}

/// A user together with the courses they are linked to.
#[derive(Debug, Clone, Serialize)]
pub struct UserDetail {
    #[serde(flatten)]
    pub user: UserResponse,
    #[serde(flatten)]
    pub links: UserCourseLinks,
}

/// DTO for creating a new user. `email` must already be normalized.
#[derive(Debug)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

/// DTO for updating an existing user. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
    pub profile_picture: Option<String>,
}

/// Summary of what an admin user deletion removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UserDeletion {
    /// Courses owned by the user, deleted with their enrollments and reviews.
    pub deleted_courses: u64,
    /// Courses the user was enrolled in and has been removed from.
    pub unenrolled_courses: u64,
}
