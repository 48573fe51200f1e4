//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Operations that enforce a domain
//! rule inside a transaction return [`crate::DbError`]; the rest return
//! `sqlx::Error`.

pub mod content_repo;
pub mod course_repo;
pub mod enrollment_repo;
pub mod review_repo;
pub mod stats_repo;
pub mod user_repo;

pub use content_repo::ContentRepo;
pub use course_repo::CourseRepo;
pub use enrollment_repo::EnrollmentRepo;
pub use review_repo::ReviewRepo;
pub use stats_repo::StatsRepo;
pub use user_repo::UserRepo;
