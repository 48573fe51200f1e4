//! Course review model and DTOs.

use coursehub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from `course_reviews`, joined with the author's current name.
///
/// `user_id` and `author_name` are `None` once the author's account has
/// been deleted; the review itself is kept.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: DbId,
    pub course_id: DbId,
    pub user_id: Option<DbId>,
    pub author_name: Option<String>,
    pub rating: i16,
    pub comment: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a new review.
#[derive(Debug)]
pub struct CreateReview {
    pub course_id: DbId,
    pub user_id: DbId,
    pub rating: i16,
    pub comment: Option<String>,
}
