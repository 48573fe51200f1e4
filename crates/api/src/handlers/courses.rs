//! Handlers for the `/courses` resource.
//!
//! Listing and detail are public. Authoring requires an instructor or admin
//! and, for existing courses, ownership (admins may manage any course).
//! Enrollment and reviews are student-only.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use coursehub_core::course::{
    validate_category, validate_content_type, validate_description, validate_duration,
    validate_level, validate_price, validate_title, DEFAULT_CATEGORY, DEFAULT_LEVEL,
};
use coursehub_core::enrollment::ensure_can_manage_course;
use coursehub_core::error::CoreError;
use coursehub_core::query::{CourseQuery, CourseSearchParams, Visibility};
use coursehub_core::review::validate_review;
use coursehub_core::types::DbId;
use coursehub_db::models::content::{ContentItem, CreateContentItem};
use coursehub_db::models::course::{
    Course, CourseDeletion, CourseDetail, CreateCourse, UpdateCourse,
};
use coursehub_db::models::enrollment::EnrollmentReceipt;
use coursehub_db::models::review::{CreateReview, Review};
use coursehub_db::repositories::{
    ContentRepo, CourseRepo, EnrollmentRepo, ReviewRepo, UserRepo,
};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiQuery};
use crate::middleware::auth::MaybeAuthUser;
use crate::middleware::rbac::{RequireInstructor, RequireStudent};
use crate::response::{DataResponse, MessageResponse, PaginatedResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /courses`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCourseRequest {
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    pub level: Option<String>,
    #[validate(range(min = 0, message = "Duration must be a positive integer"))]
    pub duration_hours: Option<i32>,
    pub price: Option<f64>,
    pub thumbnail: Option<String>,
    pub is_published: Option<bool>,
}

/// Request body for `PUT /courses/{id}/content`.
#[derive(Debug, Deserialize)]
pub struct ReplaceContentRequest {
    pub content: Vec<CreateContentItem>,
}

/// Request body for `POST /courses/{id}/reviews`.
#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub rating: i16,
    pub comment: Option<String>,
}

// ---------------------------------------------------------------------------
// Public catalogue
// ---------------------------------------------------------------------------

/// GET /api/v1/courses
///
/// Published courses filtered by search text, category, level and price,
/// sorted and paginated.
pub async fn list_courses(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<CourseSearchParams>,
) -> AppResult<Json<PaginatedResponse<Course>>> {
    let query = CourseQuery::from_params(&params, Visibility::Public)?;
    let (courses, total) = CourseRepo::search(&state.pool, &query).await?;
    Ok(Json(PaginatedResponse::new(courses, total, &query.page)))
}

/// GET /api/v1/courses/{id}
///
/// Course detail with enrolled student ids, reviews and lesson content.
/// Unpublished courses are only visible to their owner and admins.
pub async fn get_course(
    State(state): State<AppState>,
    MaybeAuthUser(viewer): MaybeAuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CourseDetail>>> {
    let course = find_course(&state, id).await?;

    if !course.is_published {
        let can_see = viewer.as_ref().is_some_and(|user| {
            ensure_can_manage_course(user.user_id, &user.role, course.instructor_id).is_ok()
        });
        if !can_see {
            return Err(course_not_found(id));
        }
    }

    let enrolled_students = EnrollmentRepo::student_ids(&state.pool, id).await?;
    let reviews = ReviewRepo::list_for_course(&state.pool, id).await?;
    let content = ContentRepo::list_for_course(&state.pool, id).await?;

    Ok(Json(DataResponse {
        data: CourseDetail {
            course,
            enrolled_students,
            reviews,
            content,
        },
    }))
}

// ---------------------------------------------------------------------------
// Authoring
// ---------------------------------------------------------------------------

/// POST /api/v1/courses
///
/// Create a course owned by the caller. Titles are unique per instructor.
pub async fn create_course(
    State(state): State<AppState>,
    RequireInstructor(auth): RequireInstructor,
    ApiJson(input): ApiJson<CreateCourseRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Course>>)> {
    input.validate()?;
    validate_title(&input.title)?;
    validate_description(&input.description)?;
    let category = input.category.as_deref().unwrap_or(DEFAULT_CATEGORY);
    validate_category(category)?;
    let level = input.level.as_deref().unwrap_or(DEFAULT_LEVEL);
    validate_level(level)?;
    let price = input.price.unwrap_or(0.0);
    validate_price(price)?;

    let instructor = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    let title = input.title.trim().to_string();
    if CourseRepo::title_taken(&state.pool, instructor.id, &title, None).await? {
        return Err(duplicate_title());
    }

    let course = CourseRepo::create(
        &state.pool,
        &CreateCourse {
            title,
            description: input.description.trim().to_string(),
            instructor_id: instructor.id,
            instructor_name: instructor.name,
            category: category.to_string(),
            level: level.to_string(),
            duration_hours: input.duration_hours.unwrap_or(0),
            price,
            thumbnail: input.thumbnail.unwrap_or_default(),
            is_published: input.is_published.unwrap_or(true),
        },
    )
    .await?;

    tracing::info!(course_id = course.id, instructor_id = course.instructor_id, "Course created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: course })))
}

/// PUT /api/v1/courses/{id}
///
/// Partial update by the owner or an admin. Ownership and the cached
/// counters cannot be changed here.
pub async fn update_course(
    State(state): State<AppState>,
    RequireInstructor(auth): RequireInstructor,
    Path(id): Path<DbId>,
    ApiJson(mut input): ApiJson<UpdateCourse>,
) -> AppResult<Json<DataResponse<Course>>> {
    let course = find_course(&state, id).await?;
    ensure_can_manage_course(auth.user_id, &auth.role, course.instructor_id)?;

    if let Some(title) = input.title.as_mut() {
        validate_title(title)?;
        *title = title.trim().to_string();
        if CourseRepo::title_taken(&state.pool, course.instructor_id, title, Some(id)).await? {
            return Err(duplicate_title());
        }
    }
    if let Some(description) = input.description.as_mut() {
        validate_description(description)?;
        *description = description.trim().to_string();
    }
    if let Some(category) = &input.category {
        validate_category(category)?;
    }
    if let Some(level) = &input.level {
        validate_level(level)?;
    }
    if let Some(price) = input.price {
        validate_price(price)?;
    }
    if let Some(hours) = input.duration_hours {
        validate_duration(hours)?;
    }

    let updated = CourseRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| course_not_found(id))?;

    tracing::info!(course_id = id, user_id = auth.user_id, "Course updated");

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/courses/{id}
///
/// Delete a course; every enrolled student loses the enrollment.
pub async fn delete_course(
    State(state): State<AppState>,
    RequireInstructor(auth): RequireInstructor,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse<CourseDeletion>>> {
    let course = find_course(&state, id).await?;
    ensure_can_manage_course(auth.user_id, &auth.role, course.instructor_id)?;

    let deletion = CourseRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| course_not_found(id))?;

    tracing::info!(
        course_id = id,
        user_id = auth.user_id,
        unenrolled_students = deletion.unenrolled_students,
        "Course deleted"
    );

    Ok(Json(MessageResponse {
        message: "Course deleted successfully".into(),
        data: deletion,
    }))
}

/// PUT /api/v1/courses/{id}/content
///
/// Replace the course's lesson list.
pub async fn replace_content(
    State(state): State<AppState>,
    RequireInstructor(auth): RequireInstructor,
    Path(id): Path<DbId>,
    ApiJson(input): ApiJson<ReplaceContentRequest>,
) -> AppResult<Json<DataResponse<Vec<ContentItem>>>> {
    let course = find_course(&state, id).await?;
    ensure_can_manage_course(auth.user_id, &auth.role, course.instructor_id)?;

    for item in &input.content {
        if item.title.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Content title is required".into(),
            )));
        }
        if let Some(content_type) = &item.content_type {
            validate_content_type(content_type)?;
        }
        if let Some(minutes) = item.duration_minutes {
            validate_duration(minutes)?;
        }
    }

    let content = ContentRepo::replace(&state.pool, id, &input.content).await?;
    tracing::info!(course_id = id, items = content.len(), "Course content replaced");

    Ok(Json(DataResponse { data: content }))
}

// ---------------------------------------------------------------------------
// Enrollment and reviews
// ---------------------------------------------------------------------------

/// POST /api/v1/courses/{id}/enroll
pub async fn enroll(
    State(state): State<AppState>,
    RequireStudent(auth): RequireStudent,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse<EnrollmentReceipt>>> {
    let receipt = EnrollmentRepo::enroll(&state.pool, id, auth.user_id).await?;
    Ok(Json(MessageResponse {
        message: "Successfully enrolled in course".into(),
        data: receipt,
    }))
}

/// POST /api/v1/courses/{id}/unenroll
pub async fn unenroll(
    State(state): State<AppState>,
    RequireStudent(auth): RequireStudent,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse<EnrollmentReceipt>>> {
    let receipt = EnrollmentRepo::unenroll(&state.pool, id, auth.user_id).await?;
    Ok(Json(MessageResponse {
        message: "Successfully unenrolled from course".into(),
        data: receipt,
    }))
}

/// POST /api/v1/courses/{id}/reviews
///
/// Review a course the caller is enrolled in. One review per student.
pub async fn add_review(
    State(state): State<AppState>,
    RequireStudent(auth): RequireStudent,
    Path(id): Path<DbId>,
    ApiJson(input): ApiJson<ReviewRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Review>>)> {
    let comment = input
        .comment
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());
    validate_review(input.rating, comment.as_deref())?;

    let review = ReviewRepo::add_review(
        &state.pool,
        &CreateReview {
            course_id: id,
            user_id: auth.user_id,
            rating: input.rating,
            comment,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: review })))
}

// ---------------------------------------------------------------------------
// Dashboards
// ---------------------------------------------------------------------------

/// GET /api/v1/courses/instructor/my-courses
///
/// Every course the caller owns, published or not, newest first.
pub async fn my_courses(
    State(state): State<AppState>,
    RequireInstructor(auth): RequireInstructor,
) -> AppResult<Json<DataResponse<Vec<Course>>>> {
    let courses = CourseRepo::list_by_instructor(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: courses }))
}

/// GET /api/v1/courses/student/enrolled
pub async fn enrolled_courses(
    State(state): State<AppState>,
    RequireStudent(auth): RequireStudent,
) -> AppResult<Json<DataResponse<Vec<Course>>>> {
    let courses = EnrollmentRepo::list_enrolled_courses(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: courses }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn course_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Course",
        id,
    })
}

fn duplicate_title() -> AppError {
    AppError::Core(CoreError::Conflict(
        "You already have a course with this title".into(),
    ))
}

async fn find_course(state: &AppState, id: DbId) -> AppResult<Course> {
    CourseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| course_not_found(id))
}
