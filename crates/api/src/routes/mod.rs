pub mod admin;
pub mod auth;
pub mod courses;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/register, /auth/login                      public
/// /auth/me, /auth/profile, /auth/password          any authenticated user
///
/// /courses, /courses/{id}                          public catalogue
/// /courses (POST), /courses/{id} (PUT, DELETE)     instructor/admin, owner
/// /courses/{id}/content                            owner/admin
/// /courses/{id}/enroll, unenroll, reviews          student
/// /courses/instructor/my-courses                   instructor/admin
/// /courses/student/enrolled                        student
///
/// /admin/users, /admin/users/{id}                  admin
/// /admin/courses, /admin/stats                     admin
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/courses", courses::router())
        .nest("/admin", admin::router())
}
