//! Admin login and logout

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::middleware::auth::{create_session_token, SESSION_COOKIE};
use crate::models::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

pub async fn login(State(state): State<AppState>, Json(body): Json<LoginRequest>) -> Response {
    let config = &state.config;
    if body.username != config.admin_username || body.password != config.admin_password {
        return (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::<()>::error("invalid_credentials", "invalid username or password")),
        )
            .into_response();
    }

    let token = match create_session_token(&config.session_secret, &body.username) {
        Ok(token) => token,
        Err(err) => {
            tracing::error!(%err, "failed to sign session token");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("session_error", "could not create session")),
            )
                .into_response();
        }
    };

    let cookie =
        format!("{SESSION_COOKIE}={token}; HttpOnly; SameSite=Strict; Path=/; Max-Age=86400");
    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(ApiResponse::success(serde_json::json!({ "username": body.username }))),
    )
        .into_response()
}

pub async fn logout() -> Response {
    let cookie = format!("{SESSION_COOKIE}=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0");
    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(ApiResponse::success(())),
    )
        .into_response()
}
