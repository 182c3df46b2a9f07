//! API route definitions.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::json;

use crate::AppState;
use veyra_shared::AppError;

pub mod health;
pub mod leads;
pub mod media;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(leads::routes())
        .merge(media::routes())
}

/// Maps an application error onto its transport response.
///
/// Internal failures collapse to the fixed body so nothing leaks.
pub(crate) fn error_response(err: &AppError) -> Response {
    if matches!(err, AppError::Internal(_)) {
        return internal_error();
    }

    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string()
        })),
    )
        .into_response()
}

/// Fixed-shape body for unexpected failures.
pub(crate) fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": "Internal server error"})),
    )
        .into_response()
}
