//! Repository for the `courses` table.

use coursehub_core::query::CourseQuery;
use coursehub_core::types::DbId;
use sqlx::PgPool;

use crate::models::course::{Course, CourseDeletion, CreateCourse, UpdateCourse};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, instructor_id, instructor_name, category, level, \
                       duration_hours, price, thumbnail, is_published, enrollment_count, rating, \
                       created_at, updated_at";

/// `WHERE` clause shared by the listing and its count.
///
/// `$1` search pattern, `$2` category, `$3` level, `$4` published flag,
/// `$5` minimum price, `$6` maximum price. A `NULL` bind disables the filter.
const SEARCH_FILTER: &str = "\
    ($1::TEXT IS NULL OR title ILIKE $1 OR description ILIKE $1 \
        OR instructor_name ILIKE $1 OR category ILIKE $1) \
    AND ($2::TEXT IS NULL OR category = $2) \
    AND ($3::TEXT IS NULL OR level = $3) \
    AND ($4::BOOLEAN IS NULL OR is_published = $4) \
    AND ($5::DOUBLE PRECISION IS NULL OR price >= $5) \
    AND ($6::DOUBLE PRECISION IS NULL OR price <= $6)";

/// Provides CRUD and search operations for courses.
pub struct CourseRepo;

impl CourseRepo {
    /// Insert a new course, returning the created row.
    ///
    /// A duplicate title for the same instructor violates
    /// `uq_courses_instructor_title`.
    pub async fn create(pool: &PgPool, input: &CreateCourse) -> Result<Course, sqlx::Error> {
        let query = format!(
            "INSERT INTO courses
                (title, description, instructor_id, instructor_name, category, level,
                 duration_hours, price, thumbnail, is_published)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.instructor_id)
            .bind(&input.instructor_name)
            .bind(&input.category)
            .bind(&input.level)
            .bind(input.duration_hours)
            .bind(input.price)
            .bind(&input.thumbnail)
            .bind(input.is_published)
            .fetch_one(pool)
            .await
    }

    /// Find a course by ID, published or not.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether the instructor already owns another course with this title.
    pub async fn title_taken(
        pool: &PgPool,
        instructor_id: DbId,
        title: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                SELECT 1 FROM courses
                WHERE instructor_id = $1 AND title = $2 AND ($3::BIGINT IS NULL OR id <> $3)
             )",
        )
        .bind(instructor_id)
        .bind(title)
        .bind(exclude_id)
        .fetch_one(pool)
        .await
    }

    /// List one page of courses matching `query`, plus the total number of
    /// matches before paging.
    pub async fn search(
        pool: &PgPool,
        query: &CourseQuery,
    ) -> Result<(Vec<Course>, i64), sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM courses WHERE {SEARCH_FILTER} \
             ORDER BY {} LIMIT $7 OFFSET $8",
            query.sort.order_by()
        );
        let courses = sqlx::query_as::<_, Course>(&sql)
            .bind(&query.search_pattern)
            .bind(&query.category)
            .bind(&query.level)
            .bind(query.published)
            .bind(query.min_price)
            .bind(query.max_price)
            .bind(query.page.limit)
            .bind(query.page.offset())
            .fetch_all(pool)
            .await?;

        let count_sql = format!("SELECT COUNT(*) FROM courses WHERE {SEARCH_FILTER}");
        let total = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(&query.search_pattern)
            .bind(&query.category)
            .bind(&query.level)
            .bind(query.published)
            .bind(query.min_price)
            .bind(query.max_price)
            .fetch_one(pool)
            .await?;

        Ok((courses, total))
    }

    /// All courses owned by an instructor, newest first, published or not.
    pub async fn list_by_instructor(
        pool: &PgPool,
        instructor_id: DbId,
    ) -> Result<Vec<Course>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM courses WHERE instructor_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(instructor_id)
            .fetch_all(pool)
            .await
    }

    /// Update a course. Only non-`None` fields in `input` are applied.
    ///
    /// Ownership, the instructor name snapshot and the cached counters are
    /// never touched here. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCourse,
    ) -> Result<Option<Course>, sqlx::Error> {
        let query = format!(
            "UPDATE courses SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                level = COALESCE($5, level),
                duration_hours = COALESCE($6, duration_hours),
                price = COALESCE($7, price),
                thumbnail = COALESCE($8, thumbnail),
                is_published = COALESCE($9, is_published)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.level)
            .bind(input.duration_hours)
            .bind(input.price)
            .bind(&input.thumbnail)
            .bind(input.is_published)
            .fetch_optional(pool)
            .await
    }

    /// Delete a course together with its enrollments, reviews and content.
    ///
    /// Enrollments are removed explicitly so the number of students who lost
    /// access can be reported; reviews and content follow by `ON DELETE
    /// CASCADE`. Returns `None` if no row with the given `id` exists.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<CourseDeletion>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let unenrolled_students = sqlx::query("DELETE FROM course_enrollments WHERE course_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if deleted == 0 {
            return Ok(None);
        }

        tx.commit().await?;

        Ok(Some(CourseDeletion {
            unenrolled_students,
        }))
    }
}
