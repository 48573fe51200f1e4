//! Course lesson content model and DTOs.

use coursehub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from `course_content`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContentItem {
    pub id: DbId,
    pub course_id: DbId,
    pub title: String,
    pub content_type: String,
    pub body: String,
    pub duration_minutes: i32,
    pub sort_order: i32,
    pub created_at: Timestamp,
}

/// DTO for one lesson in a content replacement.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContentItem {
    pub title: String,
    pub content_type: Option<String>,
    pub body: String,
    pub duration_minutes: Option<i32>,
    pub sort_order: i32,
}
