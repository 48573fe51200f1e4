//! Course entity model and DTOs.

use coursehub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::content::ContentItem;
use crate::models::review::Review;

/// A row from the `courses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub instructor_id: DbId,
    /// Owner's name at creation time; intentionally not kept in sync.
    pub instructor_name: String,
    pub category: String,
    pub level: String,
    pub duration_hours: i32,
    pub price: f64,
    pub thumbnail: String,
    pub is_published: bool,
    /// Cached size of the enrollment set.
    pub enrollment_count: i32,
    /// Cached mean of review ratings, 0 without reviews.
    pub rating: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A course with everything it owns, as shown on the course page.
#[derive(Debug, Clone, Serialize)]
pub struct CourseDetail {
    #[serde(flatten)]
    pub course: Course,
    pub enrolled_students: Vec<DbId>,
    pub reviews: Vec<Review>,
    pub content: Vec<ContentItem>,
}

/// DTO for creating a new course.
///
/// The instructor fields come from the authenticated requester, never from
/// the request body.
#[derive(Debug)]
pub struct CreateCourse {
    pub title: String,
    pub description: String,
    pub instructor_id: DbId,
    pub instructor_name: String,
    pub category: String,
    pub level: String,
    pub duration_hours: i32,
    pub price: f64,
    pub thumbnail: String,
    pub is_published: bool,
}

/// DTO for updating an existing course. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCourse {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub level: Option<String>,
    pub duration_hours: Option<i32>,
    pub price: Option<f64>,
    pub thumbnail: Option<String>,
    pub is_published: Option<bool>,
}

/// Summary of a course deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CourseDeletion {
    /// Students whose enrollment in the course was removed.
    pub unenrolled_students: u64,
}
