//! Handlers for the `/auth` resource (register, login, profile, password).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use coursehub_core::error::CoreError;
use coursehub_core::roles::{validate_registration_role, ROLE_STUDENT};
use coursehub_core::types::DbId;
use coursehub_core::user::{normalize_email, validate_name};
use coursehub_db::models::user::{CreateUser, UpdateUser, User, UserDetail, UserResponse};
use coursehub_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    pub name: String,
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,
    pub password: String,
    /// `student` (default) or `instructor`.
    pub role: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Request body for `PUT /auth/profile`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    #[validate(email(message = "Please provide a valid email"))]
    pub email: Option<String>,
    #[validate(url(message = "Profile picture must be a valid URL"))]
    pub profile_picture: Option<String>,
}

/// Request body for `PUT /auth/password`.
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    pub new_password: String,
}

/// Successful authentication response returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create a student or instructor account and log it in. Admin accounts
/// cannot be self-registered.
pub async fn register(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<AuthResponse>>)> {
    input.validate()?;
    validate_name(&input.name)?;
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    let role = input.role.as_deref().unwrap_or(ROLE_STUDENT);
    validate_registration_role(role)?;

    let email = normalize_email(&input.email);
    if UserRepo::email_taken(&state.pool, &email, None).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "User already exists with this email".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name: input.name.trim().to_string(),
            email,
            password_hash,
            role: role.to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, role = %user.role, "User registered");

    let response = auth_response(&state, &user)?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: response })))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<LoginRequest>,
) -> AppResult<Json<DataResponse<AuthResponse>>> {
    input.validate()?;

    let user = UserRepo::find_by_email(&state.pool, &normalize_email(&input.email))
        .await?
        .ok_or_else(invalid_credentials)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(invalid_credentials());
    }

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    UserRepo::record_successful_login(&state.pool, user.id).await?;
    tracing::info!(user_id = user.id, "User logged in");

    let response = auth_response(&state, &user)?;
    Ok(Json(DataResponse { data: response }))
}

/// GET /api/v1/auth/me
///
/// The authenticated user with the courses they are enrolled in and own.
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<UserDetail>>> {
    let detail = load_user_detail(&state, auth.user_id).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/v1/auth/profile
///
/// Update the caller's name, email or profile picture.
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(input): ApiJson<UpdateProfileRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    input.validate()?;
    if let Some(name) = &input.name {
        validate_name(name)?;
    }

    let email = input.email.as_deref().map(normalize_email);
    if let Some(email) = &email {
        if UserRepo::email_taken(&state.pool, email, Some(auth.user_id)).await? {
            return Err(AppError::Core(CoreError::Conflict(
                "Email is already in use".into(),
            )));
        }
    }

    let update = UpdateUser {
        name: input.name.map(|n| n.trim().to_string()),
        email,
        profile_picture: input.profile_picture,
        ..Default::default()
    };
    let user = UserRepo::update(&state.pool, auth.user_id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}

/// PUT /api/v1/auth/password
///
/// Change the caller's password after re-checking the current one.
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(input): ApiJson<ChangePasswordRequest>,
) -> AppResult<Json<MessageResponse<()>>> {
    input.validate()?;

    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    let current_valid = verify_password(&input.current_password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !current_valid {
        return Err(AppError::Core(CoreError::Validation(
            "Current password is incorrect".into(),
        )));
    }

    validate_password_strength(&input.new_password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    let password_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::update_password(&state.pool, user.id, &password_hash).await?;

    tracing::info!(user_id = user.id, "Password changed");

    Ok(Json(MessageResponse {
        message: "Password updated successfully".into(),
        data: (),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid email or password".into(),
    ))
}

fn auth_response(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let token = generate_access_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(AuthResponse {
        token,
        expires_in: state.config.jwt.expiry_hours * 3600,
        user: UserResponse::from(user),
    })
}

/// Load a user together with the derived enrolled/created course lists.
pub(crate) async fn load_user_detail(state: &AppState, id: DbId) -> AppResult<UserDetail> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    let links = UserRepo::course_links(&state.pool, id).await?;

    Ok(UserDetail {
        user: UserResponse::from(&user),
        links,
    })
}
