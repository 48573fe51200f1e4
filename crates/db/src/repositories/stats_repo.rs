//! Read-only aggregation queries for the admin dashboard.

use coursehub_core::stats::{
    DashboardTotals, RoleCounts, POPULAR_COURSES_LIMIT, RECENT_USERS_LIMIT,
};
use sqlx::PgPool;

use crate::models::stats::{DashboardStats, PopularCourse, RecentUser};

/// Provides dashboard statistics.
pub struct StatsRepo;

impl StatsRepo {
    /// Compute the full dashboard: headline totals, the most enrolled
    /// courses and the newest users.
    pub async fn dashboard(pool: &PgPool) -> Result<DashboardStats, sqlx::Error> {
        let role_rows = sqlx::query_as::<_, (String, i64)>(
            "SELECT role, COUNT(*) FROM users GROUP BY role",
        )
        .fetch_all(pool)
        .await?;
        let roles = RoleCounts::from_rows(
            role_rows
                .iter()
                .map(|(role, count)| (role.as_str(), *count)),
        );

        let (total_courses, published_courses, total_enrollments) =
            sqlx::query_as::<_, (i64, i64, i64)>(
                "SELECT COUNT(*),
                        COUNT(*) FILTER (WHERE is_published),
                        COALESCE(SUM(enrollment_count), 0)::BIGINT
                 FROM courses",
            )
            .fetch_one(pool)
            .await?;

        // Ties keep the older course first.
        let popular_courses = sqlx::query_as::<_, PopularCourse>(
            "SELECT id, title, instructor_name, enrollment_count, rating, created_at
             FROM courses
             ORDER BY enrollment_count DESC, created_at ASC, id ASC
             LIMIT $1",
        )
        .bind(POPULAR_COURSES_LIMIT)
        .fetch_all(pool)
        .await?;

        let recent_users = sqlx::query_as::<_, RecentUser>(
            "SELECT id, name, email, role, created_at FROM users
             ORDER BY created_at DESC, id DESC
             LIMIT $1",
        )
        .bind(RECENT_USERS_LIMIT)
        .fetch_all(pool)
        .await?;

        Ok(DashboardStats {
            stats: DashboardTotals::new(roles, total_courses, published_courses, total_enrollments),
            popular_courses,
            recent_users,
        })
    }
}
