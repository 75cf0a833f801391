//! Route handlers

pub mod auth;
pub mod config_paths;
pub mod health;
pub mod navigation;
pub mod pages;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::models::ApiResponse;
use crate::store::StoreError;

/// Map a store error to the admin API's response shape.
pub(crate) fn store_error_response(err: StoreError) -> Response {
    let (status, code, message) = match err {
        StoreError::NotFound => (StatusCode::NOT_FOUND, "not_found", "record not found"),
        StoreError::Duplicate => (StatusCode::CONFLICT, "duplicate", "record already exists"),
        StoreError::Unavailable(_) => {
            tracing::error!(%err, "store unavailable");
            (StatusCode::INTERNAL_SERVER_ERROR, "store_unavailable", "store unavailable")
        }
    };
    (status, Json(ApiResponse::<()>::error(code, message))).into_response()
}
