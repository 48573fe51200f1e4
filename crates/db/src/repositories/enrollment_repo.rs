//! Repository for the `course_enrollments` table.
//!
//! The table is the single source of truth for who is enrolled where. The
//! course row's `enrollment_count` is a cache recomputed from it inside the
//! same transaction as every change.

use coursehub_core::enrollment::{
    enrollment_count, ensure_enrolled_now, ensure_unenrolled_now, MembershipChange,
};
use coursehub_core::error::CoreError;
use coursehub_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::error::DbError;
use crate::models::course::Course;
use crate::models::enrollment::EnrollmentReceipt;

/// Course columns qualified for joins against `course_enrollments`.
const COURSE_COLUMNS: &str = "c.id, c.title, c.description, c.instructor_id, c.instructor_name, \
                              c.category, c.level, c.duration_hours, c.price, c.thumbnail, \
                              c.is_published, c.enrollment_count, c.rating, c.created_at, \
                              c.updated_at";

/// Provides enrollment set operations.
pub struct EnrollmentRepo;

impl EnrollmentRepo {
    /// Add a student to a published course.
    ///
    /// Fails with `NotFound` when the course does not exist or is not
    /// published, and with `Conflict` when the student is already enrolled.
    pub async fn enroll(
        pool: &PgPool,
        course_id: DbId,
        user_id: DbId,
    ) -> Result<EnrollmentReceipt, DbError> {
        let mut tx = pool.begin().await?;

        let published = lock_course(&mut *tx, course_id).await?;
        if published != Some(true) {
            return Err(CoreError::NotFound {
                entity: "Course",
                id: course_id,
            }
            .into());
        }

        let inserted = sqlx::query(
            "INSERT INTO course_enrollments (course_id, user_id) VALUES ($1, $2)
             ON CONFLICT (course_id, user_id) DO NOTHING",
        )
        .bind(course_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
        ensure_enrolled_now(MembershipChange::from_rows_affected(inserted))?;

        let enrollment_count = refresh_enrollment_count(&mut *tx, course_id).await?;
        tx.commit().await?;

        tracing::info!(course_id, user_id, enrollment_count, "Student enrolled");

        Ok(EnrollmentReceipt {
            course_id,
            user_id,
            enrollment_count,
        })
    }

    /// Remove a student from a course.
    ///
    /// Fails with `NotFound` when the course does not exist and with
    /// `NotEnrolled` when the student was not enrolled.
    pub async fn unenroll(
        pool: &PgPool,
        course_id: DbId,
        user_id: DbId,
    ) -> Result<EnrollmentReceipt, DbError> {
        let mut tx = pool.begin().await?;

        if lock_course(&mut *tx, course_id).await?.is_none() {
            return Err(CoreError::NotFound {
                entity: "Course",
                id: course_id,
            }
            .into());
        }

        let removed =
            sqlx::query("DELETE FROM course_enrollments WHERE course_id = $1 AND user_id = $2")
                .bind(course_id)
                .bind(user_id)
                .execute(&mut *tx)
                .await?
                .rows_affected();
        ensure_unenrolled_now(MembershipChange::from_rows_affected(removed))?;

        let enrollment_count = refresh_enrollment_count(&mut *tx, course_id).await?;
        tx.commit().await?;

        tracing::info!(course_id, user_id, enrollment_count, "Student unenrolled");

        Ok(EnrollmentReceipt {
            course_id,
            user_id,
            enrollment_count,
        })
    }

    /// Whether the student is currently enrolled in the course.
    pub async fn is_enrolled(
        pool: &PgPool,
        course_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                SELECT 1 FROM course_enrollments WHERE course_id = $1 AND user_id = $2
             )",
        )
        .bind(course_id)
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// IDs of the students enrolled in a course, in enrollment order.
    pub async fn student_ids(pool: &PgPool, course_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT user_id FROM course_enrollments WHERE course_id = $1
             ORDER BY enrolled_at ASC, user_id ASC",
        )
        .bind(course_id)
        .fetch_all(pool)
        .await
    }

    /// Courses a student is enrolled in, most recent enrollment first.
    pub async fn list_enrolled_courses(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Course>, sqlx::Error> {
        let query = format!(
            "SELECT {COURSE_COLUMNS} FROM course_enrollments e
             JOIN courses c ON c.id = e.course_id
             WHERE e.user_id = $1
             ORDER BY e.enrolled_at DESC, c.id DESC"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}

/// Lock a course row for the rest of the transaction and return its
/// `is_published` flag, or `None` if the course does not exist.
async fn lock_course(conn: &mut PgConnection, course_id: DbId) -> Result<Option<bool>, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT is_published FROM courses WHERE id = $1 FOR UPDATE")
        .bind(course_id)
        .fetch_optional(conn)
        .await
}

/// Recompute a course's cached `enrollment_count` from the enrollment set.
///
/// Must run on the connection of the transaction that changed the set.
pub(crate) async fn refresh_enrollment_count(
    conn: &mut PgConnection,
    course_id: DbId,
) -> Result<i32, sqlx::Error> {
    lock_course(&mut *conn, course_id).await?;

    let members =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM course_enrollments WHERE course_id = $1")
            .bind(course_id)
            .fetch_one(&mut *conn)
            .await?;
    let count = enrollment_count(members);

    sqlx::query("UPDATE courses SET enrollment_count = $2 WHERE id = $1")
        .bind(course_id)
        .bind(count)
        .execute(&mut *conn)
        .await?;

    Ok(count)
}
