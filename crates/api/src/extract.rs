//! Request extractors whose rejections use the API's JSON error format.
//!
//! Axum's own `Json` and `Query` reject malformed input with plain-text
//! 4xx responses. These wrappers route the rejection through [`AppError`],
//! so a wrongly typed body field or query parameter is reported as a
//! 400 `VALIDATION_ERROR` like every other invalid input.

use axum::extract::{FromRequest, FromRequestParts, Query};
use axum::Json;

use crate::error::AppError;

/// JSON request body.
///
/// ```ignore
/// async fn create(ApiJson(input): ApiJson<CreateCourseRequest>) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Query-string parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);
