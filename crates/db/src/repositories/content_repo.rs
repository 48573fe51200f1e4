//! Repository for the `course_content` table.

use coursehub_core::course::DEFAULT_CONTENT_TYPE;
use coursehub_core::types::DbId;
use sqlx::PgPool;

use crate::models::content::{ContentItem, CreateContentItem};

const COLUMNS: &str =
    "id, course_id, title, content_type, body, duration_minutes, sort_order, created_at";

/// Provides operations on a course's ordered content items.
pub struct ContentRepo;

impl ContentRepo {
    /// Content of a course in `sort_order`.
    pub async fn list_for_course(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<Vec<ContentItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM course_content WHERE course_id = $1
             ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, ContentItem>(&query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// Replace the whole content list of a course in one transaction.
    pub async fn replace(
        pool: &PgPool,
        course_id: DbId,
        items: &[CreateContentItem],
    ) -> Result<Vec<ContentItem>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM course_content WHERE course_id = $1")
            .bind(course_id)
            .execute(&mut *tx)
            .await?;

        let insert = format!(
            "INSERT INTO course_content
                (course_id, title, content_type, body, duration_minutes, sort_order)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let mut created = Vec::with_capacity(items.len());
        for item in items {
            let row = sqlx::query_as::<_, ContentItem>(&insert)
                .bind(course_id)
                .bind(&item.title)
                .bind(item.content_type.as_deref().unwrap_or(DEFAULT_CONTENT_TYPE))
                .bind(&item.body)
                .bind(item.duration_minutes.unwrap_or(0))
                .bind(item.sort_order)
                .fetch_one(&mut *tx)
                .await?;
            created.push(row);
        }

        tx.commit().await?;

        created.sort_by_key(|item| (item.sort_order, item.id));
        Ok(created)
    }
}
