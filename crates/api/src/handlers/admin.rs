//! Handlers for the `/admin` resource (user management, course oversight,
//! dashboard statistics).
//!
//! All handlers require the `admin` role via [`RequireAdmin`].

use axum::extract::{Path, State};
use axum::Json;
use coursehub_core::error::CoreError;
use coursehub_core::query::{
    CourseQuery, CourseSearchParams, UserQuery, UserSearchParams, Visibility,
};
use coursehub_core::roles::validate_role;
use coursehub_core::types::DbId;
use coursehub_core::user::{normalize_email, validate_name};
use coursehub_db::models::course::Course;
use coursehub_db::models::stats::DashboardStats;
use coursehub_db::models::user::{UpdateUser, UserDeletion, UserDetail, UserResponse};
use coursehub_db::repositories::{CourseRepo, StatsRepo, UserRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiQuery};
use crate::handlers::auth::load_user_detail;
use crate::middleware::rbac::RequireAdmin;
use crate::response::{DataResponse, MessageResponse, PaginatedResponse};
use crate::state::AppState;

/// Request body for `PUT /admin/users/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    #[validate(email(message = "Please provide a valid email"))]
    pub email: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

/// GET /api/v1/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    ApiQuery(params): ApiQuery<UserSearchParams>,
) -> AppResult<Json<PaginatedResponse<UserResponse>>> {
    let query = UserQuery::from_params(&params)?;
    let (users, total) = UserRepo::search(&state.pool, &query).await?;
    let users = users.iter().map(UserResponse::from).collect();
    Ok(Json(PaginatedResponse::new(users, total, &query.page)))
}

/// GET /api/v1/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserDetail>>> {
    let detail = load_user_detail(&state, id).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/v1/admin/users/{id}
///
/// Update name, email, role or active flag. The email must not belong to
/// another user.
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    ApiJson(input): ApiJson<UpdateUserRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    input.validate()?;
    if let Some(name) = &input.name {
        validate_name(name)?;
    }
    if let Some(role) = &input.role {
        validate_role(role)?;
    }

    let email = input.email.as_deref().map(normalize_email);
    if let Some(email) = &email {
        if UserRepo::email_taken(&state.pool, email, Some(id)).await? {
            return Err(AppError::Core(CoreError::Conflict(
                "Email is already in use".into(),
            )));
        }
    }

    let update = UpdateUser {
        name: input.name.map(|n| n.trim().to_string()),
        email,
        role: input.role,
        is_active: input.is_active,
        profile_picture: None,
    };
    let user = UserRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    tracing::info!(user_id = id, admin_id = admin.user_id, "User updated by admin");

    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}

/// DELETE /api/v1/admin/users/{id}
///
/// Delete a user, their owned courses and their enrollments. Admins cannot
/// delete their own account.
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse<UserDeletion>>> {
    if id == admin.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot delete your own account".into(),
        )));
    }

    let deletion = UserRepo::delete_cascade(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    Ok(Json(MessageResponse {
        message: "User deleted successfully".into(),
        data: deletion,
    }))
}

/// GET /api/v1/admin/courses
///
/// All courses, published or not, with an optional `status` filter.
pub async fn list_courses(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    ApiQuery(params): ApiQuery<CourseSearchParams>,
) -> AppResult<Json<PaginatedResponse<Course>>> {
    let query = CourseQuery::from_params(&params, Visibility::Admin)?;
    let (courses, total) = CourseRepo::search(&state.pool, &query).await?;
    Ok(Json(PaginatedResponse::new(courses, total, &query.page)))
}

/// GET /api/v1/admin/stats
pub async fn stats(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<DashboardStats>>> {
    let stats = StatsRepo::dashboard(&state.pool).await?;
    Ok(Json(DataResponse { data: stats }))
}
