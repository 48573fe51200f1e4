//! Repository for the `course_reviews` table.

use coursehub_core::enrollment::MembershipChange;
use coursehub_core::error::CoreError;
use coursehub_core::review::{average_rating, ensure_can_review, ensure_first_review};
use coursehub_core::types::DbId;
use sqlx::PgPool;

use crate::error::DbError;
use crate::models::review::{CreateReview, Review};

/// Review columns with the author's current name joined in. Detached
/// reviews (author deleted) have no name.
const JOINED_COLUMNS: &str = "r.id, r.course_id, r.user_id, u.name AS author_name, r.rating, \
                              r.comment, r.created_at";

/// Provides review operations.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Add a review and recompute the course's average rating.
    ///
    /// The author must be enrolled in the course (`NotEnrolled`) and may
    /// review it only once (`Conflict`).
    pub async fn add_review(pool: &PgPool, input: &CreateReview) -> Result<Review, DbError> {
        let mut tx = pool.begin().await?;

        let course = sqlx::query_scalar::<_, DbId>("SELECT id FROM courses WHERE id = $1 FOR UPDATE")
            .bind(input.course_id)
            .fetch_optional(&mut *tx)
            .await?;
        if course.is_none() {
            return Err(CoreError::NotFound {
                entity: "Course",
                id: input.course_id,
            }
            .into());
        }

        let enrolled = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                SELECT 1 FROM course_enrollments WHERE course_id = $1 AND user_id = $2
             )",
        )
        .bind(input.course_id)
        .bind(input.user_id)
        .fetch_one(&mut *tx)
        .await?;
        ensure_can_review(enrolled)?;

        let review_id = sqlx::query_scalar::<_, DbId>(
            "INSERT INTO course_reviews (course_id, user_id, rating, comment)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT ON CONSTRAINT uq_course_reviews_course_user DO NOTHING
             RETURNING id",
        )
        .bind(input.course_id)
        .bind(input.user_id)
        .bind(input.rating)
        .bind(&input.comment)
        .fetch_optional(&mut *tx)
        .await?;
        ensure_first_review(MembershipChange::from_rows_affected(
            u64::from(review_id.is_some()),
        ))?;

        let ratings =
            sqlx::query_scalar::<_, i16>("SELECT rating FROM course_reviews WHERE course_id = $1")
                .bind(input.course_id)
                .fetch_all(&mut *tx)
                .await?;
        let rating = average_rating(&ratings);
        sqlx::query("UPDATE courses SET rating = $2 WHERE id = $1")
            .bind(input.course_id)
            .bind(rating)
            .execute(&mut *tx)
            .await?;

        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM course_reviews r
             LEFT JOIN users u ON u.id = r.user_id
             WHERE r.id = $1"
        );
        let review = sqlx::query_as::<_, Review>(&query)
            .bind(review_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            course_id = input.course_id,
            user_id = input.user_id,
            rating,
            "Review added"
        );

        Ok(review)
    }

    /// Reviews of a course, oldest first.
    pub async fn list_for_course(pool: &PgPool, course_id: DbId) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM course_reviews r
             LEFT JOIN users u ON u.id = r.user_id
             WHERE r.course_id = $1
             ORDER BY r.created_at ASC, r.id ASC"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }
}
