//! Route definitions for the `/courses` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::courses;
use crate::state::AppState;

/// Routes mounted at `/courses`.
///
/// ```text
/// GET    /                        -> list_courses (public)
/// POST   /                        -> create_course (instructor/admin)
/// GET    /instructor/my-courses   -> my_courses (instructor/admin)
/// GET    /student/enrolled        -> enrolled_courses (student)
/// GET    /{id}                    -> get_course (public)
/// PUT    /{id}                    -> update_course (owner/admin)
/// DELETE /{id}                    -> delete_course (owner/admin)
/// PUT    /{id}/content            -> replace_content (owner/admin)
/// POST   /{id}/enroll             -> enroll (student)
/// POST   /{id}/unenroll           -> unenroll (student)
/// POST   /{id}/reviews            -> add_review (student)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(courses::list_courses).post(courses::create_course))
        .route("/instructor/my-courses", get(courses::my_courses))
        .route("/student/enrolled", get(courses::enrolled_courses))
        .route(
            "/{id}",
            get(courses::get_course)
                .put(courses::update_course)
                .delete(courses::delete_course),
        )
        .route("/{id}/content", put(courses::replace_content))
        .route("/{id}/enroll", post(courses::enroll))
        .route("/{id}/unenroll", post(courses::unenroll))
        .route("/{id}/reviews", post(courses::add_review))
}
