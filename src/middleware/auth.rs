//! Admin session authentication
//!
//! Sessions are HMAC-signed claims carried in an opaque, http-only cookie.
//! Admin write handlers take an [`AdminSession`] extractor; requests without a
//! valid cookie are rejected with 401 before the handler body runs.

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::models::ApiResponse;
use crate::AppState;

pub const SESSION_COOKIE: &str = "admin_session";
const SESSION_HOURS: i64 = 24;

#[derive(Debug, Serialize, Deserialize)]
pub struct AdminClaims {
    pub sub: String,
    pub exp: usize,
}

pub fn create_session_token(
    secret: &str,
    username: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let exp = (chrono::Utc::now() + chrono::Duration::hours(SESSION_HOURS)).timestamp() as usize;
    let claims = AdminClaims { sub: username.to_string(), exp };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
}

pub fn verify_session_token(
    secret: &str,
    token: &str,
) -> Result<AdminClaims, jsonwebtoken::errors::Error> {
    let data = decode::<AdminClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(header::COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
}

/// Proof of a valid admin session, extracted from the request cookie.
pub struct AdminSession {
    pub username: String,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = cookie_value(&parts.headers, SESSION_COOKIE)
            .and_then(|token| verify_session_token(&state.config.session_secret, token).ok());

        match claims {
            Some(claims) => Ok(AdminSession { username: claims.sub }),
            None => Err((
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::<()>::error("unauthorized", "admin session required")),
            )
                .into_response()),
        }
    }
}
