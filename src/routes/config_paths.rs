//! Path rule endpoints
//!
//! `GET /api/admin/config/paths` is the publisher's read interface, consumed
//! by the access gate and cacheable at the transport boundary. The write
//! interface (add, toggle, delete) requires an admin session and invalidates
//! the publisher cache on every mutation.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use uuid::Uuid;

use crate::middleware::auth::AdminSession;
use crate::models::{
    normalize_rule_path, ApiResponse, PathRule, PathRuleCreate, PathRuleToggle, PathsResponse,
};
use crate::routes::store_error_response;
use crate::AppState;

/// Current disabled-path set. Always returns a valid `paths` list; on store
/// failure the body is an empty list with a 5xx status so consumers never see
/// a malformed payload.
pub async fn disabled_paths(State(state): State<AppState>) -> Response {
    use crate::publisher::DisabledPathSource;

    let cache_control = format!(
        "public, s-maxage={}, stale-while-revalidate={}",
        state.config.cache_ttl.as_secs(),
        state.config.cache_swr.as_secs(),
    );

    match state.publisher.disabled_paths().await {
        Ok(paths) => (
            StatusCode::OK,
            [(header::CACHE_CONTROL, cache_control)],
            Json(PathsResponse { paths }),
        )
            .into_response(),
        Err(err) => {
            tracing::error!(%err, "failed to read path config");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(PathsResponse { paths: Vec::new() }))
                .into_response()
        }
    }
}

/// Full rule list for the admin panel.
pub async fn list_rules(_session: AdminSession, State(state): State<AppState>) -> Response {
    match state.path_rules.list().await {
        Ok(rules) => Json(ApiResponse::success(rules)).into_response(),
        Err(err) => store_error_response(err),
    }
}

pub async fn create_rule(
    _session: AdminSession,
    State(state): State<AppState>,
    Json(body): Json<PathRuleCreate>,
) -> Response {
    let path = match normalize_rule_path(&body.path) {
        Ok(path) => path,
        Err(err) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiResponse::<()>::error("invalid_path", &err.to_string())),
            )
                .into_response();
        }
    };

    match state.path_rules.insert(path).await {
        Ok(rule) => {
            state.publisher.invalidate();
            (StatusCode::CREATED, Json(ApiResponse::success(rule))).into_response()
        }
        Err(err) => store_error_response(err),
    }
}

pub async fn toggle_rule(
    _session: AdminSession,
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(body): Json<PathRuleToggle>,
) -> Response {
    match state.path_rules.set_enabled(id, body.is_enabled).await {
        Ok(rule) => {
            state.publisher.invalidate();
            Json(ApiResponse::<PathRule>::success(rule)).into_response()
        }
        Err(err) => store_error_response(err),
    }
}

pub async fn delete_rule(
    _session: AdminSession,
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Response {
    match state.path_rules.delete(id).await {
        Ok(()) => {
            state.publisher.invalidate();
            StatusCode::NO_CONTENT.into_response()
        }
        Err(err) => store_error_response(err),
    }
}
