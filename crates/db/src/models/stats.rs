//! Admin dashboard read models.

use coursehub_core::stats::DashboardTotals;
use coursehub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A course in the popularity ranking.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PopularCourse {
    pub id: DbId,
    pub title: String,
    pub instructor_name: String,
    pub enrollment_count: i32,
    pub rating: f64,
    pub created_at: Timestamp,
}

/// A recently registered user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecentUser {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: Timestamp,
}

/// Everything the admin dashboard shows.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub stats: DashboardTotals,
    pub popular_courses: Vec<PopularCourse>,
    pub recent_users: Vec<RecentUser>,
}
