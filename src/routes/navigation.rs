//! Navigation endpoints

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use uuid::Uuid;

use crate::middleware::auth::AdminSession;
use crate::models::{ApiResponse, NavigationItemCreate, NavigationItemUpdate};
use crate::routes::store_error_response;
use crate::AppState;

/// Public menu: active items only, ordered.
pub async fn public_list(State(state): State<AppState>) -> Response {
    match state.navigation.list(false).await {
        Ok(items) => Json(items).into_response(),
        Err(err) => store_error_response(err),
    }
}

pub async fn admin_list(_session: AdminSession, State(state): State<AppState>) -> Response {
    match state.navigation.list(true).await {
        Ok(items) => Json(ApiResponse::success(items)).into_response(),
        Err(err) => store_error_response(err),
    }
}

pub async fn create_item(
    _session: AdminSession,
    State(state): State<AppState>,
    Json(body): Json<NavigationItemCreate>,
) -> Response {
    match state.navigation.insert(body).await {
        Ok(item) => (StatusCode::CREATED, Json(ApiResponse::success(item))).into_response(),
        Err(err) => store_error_response(err),
    }
}

pub async fn update_item(
    _session: AdminSession,
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(body): Json<NavigationItemUpdate>,
) -> Response {
    match state.navigation.update(id, body).await {
        Ok(item) => Json(ApiResponse::success(item)).into_response(),
        Err(err) => store_error_response(err),
    }
}

pub async fn delete_item(
    _session: AdminSession,
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Response {
    match state.navigation.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => store_error_response(err),
    }
}
