//! Repository for the `users` table.

use coursehub_core::query::UserQuery;
use coursehub_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CourseRef, CreateUser, UpdateUser, User, UserCourseLinks, UserDeletion};
use crate::repositories::enrollment_repo::refresh_enrollment_count;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, password_hash, role, is_active, profile_picture, \
                       last_login_at, created_at, updated_at";

/// `WHERE` clause shared by the listing and its count.
///
/// `$1` search pattern, `$2` role, `$3` active flag; `NULL` disables a filter.
const SEARCH_FILTER: &str = "\
    ($1::TEXT IS NULL OR name ILIKE $1 OR email ILIKE $1) \
    AND ($2::TEXT IS NULL OR role = $2) \
    AND ($3::BOOLEAN IS NULL OR is_active = $3)";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, password_hash, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by normalized (lower-case) email.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Whether `email` belongs to a user other than `exclude_id`.
    pub async fn email_taken(
        pool: &PgPool,
        email: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                SELECT 1 FROM users WHERE email = $1 AND ($2::BIGINT IS NULL OR id <> $2)
             )",
        )
        .bind(email)
        .bind(exclude_id)
        .fetch_one(pool)
        .await
    }

    /// List one page of users matching `query`, newest first, plus the total
    /// number of matches.
    pub async fn search(pool: &PgPool, query: &UserQuery) -> Result<(Vec<User>, i64), sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM users WHERE {SEARCH_FILTER} \
             ORDER BY created_at DESC, id DESC LIMIT $4 OFFSET $5"
        );
        let users = sqlx::query_as::<_, User>(&sql)
            .bind(&query.search_pattern)
            .bind(&query.role)
            .bind(query.active)
            .bind(query.page.limit)
            .bind(query.page.offset())
            .fetch_all(pool)
            .await?;

        let count_sql = format!("SELECT COUNT(*) FROM users WHERE {SEARCH_FILTER}");
        let total = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(&query.search_pattern)
            .bind(&query.role)
            .bind(query.active)
            .fetch_one(pool)
            .await?;

        Ok((users, total))
    }

    /// Update a user. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                role = COALESCE($4, role),
                is_active = COALESCE($5, is_active),
                profile_picture = COALESCE($6, profile_picture)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.role)
            .bind(input.is_active)
            .bind(&input.profile_picture)
            .fetch_optional(pool)
            .await
    }

    /// Set `last_login_at` to now.
    pub async fn record_successful_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Update a user's password hash. Returns `true` if the row was updated.
    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Courses the user is enrolled in and courses the user owns, newest first.
    pub async fn course_links(pool: &PgPool, id: DbId) -> Result<UserCourseLinks, sqlx::Error> {
        let enrolled_courses = sqlx::query_as::<_, CourseRef>(
            "SELECT c.id, c.title FROM course_enrollments e
             JOIN courses c ON c.id = e.course_id
             WHERE e.user_id = $1
             ORDER BY e.enrolled_at DESC, c.id DESC",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;

        let created_courses = sqlx::query_as::<_, CourseRef>(
            "SELECT id, title FROM courses WHERE instructor_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;

        Ok(UserCourseLinks {
            enrolled_courses,
            created_courses,
        })
    }

    /// Delete a user and everything that depends on them, in one transaction.
    ///
    /// 1. Every course the user owns is deleted together with its
    ///    enrollments, reviews and content.
    /// 2. The user's own enrollments are removed and the enrollment count of
    ///    each affected course is recomputed.
    /// 3. The user's reviews elsewhere are kept, detached by the
    ///    `ON DELETE SET NULL` foreign key, so course ratings do not change.
    /// 4. The user row is deleted.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn delete_cascade(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<UserDeletion>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Course rows before the user row, in id order: enrollment takes the
        // course lock and then a key-share lock on the user.
        sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM courses
             WHERE instructor_id = $1
                OR id IN (SELECT course_id FROM course_enrollments WHERE user_id = $1)
             ORDER BY id
             FOR UPDATE",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        let exists = sqlx::query_scalar::<_, DbId>("SELECT id FROM users WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Ok(None);
        }

        // Owned courses: same cascade as a single course deletion.
        sqlx::query(
            "DELETE FROM course_enrollments
             WHERE course_id IN (SELECT id FROM courses WHERE instructor_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;
        let deleted_courses = sqlx::query("DELETE FROM courses WHERE instructor_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        // The user's own enrollments.
        let course_ids = sqlx::query_scalar::<_, DbId>(
            "DELETE FROM course_enrollments WHERE user_id = $1 RETURNING course_id",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;
        for course_id in &course_ids {
            refresh_enrollment_count(&mut *tx, *course_id).await?;
        }

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            user_id = id,
            deleted_courses,
            unenrolled_courses = course_ids.len(),
            "User deleted"
        );

        Ok(Some(UserDeletion {
            deleted_courses,
            unenrolled_courses: course_ids.len() as u64,
        }))
    }
}
