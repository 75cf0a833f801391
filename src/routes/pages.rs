//! Public page rendering and page administration
//!
//! The public surface is a fallback handler: any route not claimed by the API
//! is looked up in the page store and rendered as HTML. A blocked route and a
//! route that genuinely does not exist share the same not-found page.

use axum::extract::{Path, State};
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use uuid::Uuid;

use crate::middleware::auth::AdminSession;
use crate::models::{normalize_rule_path, ApiResponse, Page, PageCreate, PageUpdate};
use crate::routes::store_error_response;
use crate::AppState;

pub async fn render_page(State(state): State<AppState>, uri: Uri) -> Response {
    match state.pages.find_by_path(uri.path()).await {
        Ok(Some(page)) => Html(render(&page)).into_response(),
        Ok(None) => not_found().into_response(),
        Err(err) => {
            tracing::error!(%err, path = uri.path(), "failed to load page");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<h1>Something went wrong</h1>".to_string()),
            )
                .into_response()
        }
    }
}

/// Shared not-found presentation, also used by the access gate for blocked
/// routes so the two are indistinguishable.
pub fn not_found() -> (StatusCode, Html<String>) {
    (
        StatusCode::NOT_FOUND,
        Html("<!doctype html><html><body><h1>Page not found</h1></body></html>".to_string()),
    )
}

fn render(page: &Page) -> String {
    format!(
        "<!doctype html><html><head><title>{title}</title></head>\
         <body><h1>{title}</h1>{body}</body></html>",
        title = escape(&page.title),
        body = page.body,
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

// ============ Admin CRUD ============

pub async fn admin_list(_session: AdminSession, State(state): State<AppState>) -> Response {
    match state.pages.list().await {
        Ok(pages) => Json(ApiResponse::success(pages)).into_response(),
        Err(err) => store_error_response(err),
    }
}

pub async fn create_page(
    _session: AdminSession,
    State(state): State<AppState>,
    Json(mut body): Json<PageCreate>,
) -> Response {
    // Page paths follow the same shape as rule paths, except the home page is
    // a legitimate target here.
    if body.path != "/" {
        body.path = match normalize_rule_path(&body.path) {
            Ok(path) => path,
            Err(err) => {
                return (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(ApiResponse::<()>::error("invalid_path", &err.to_string())),
                )
                    .into_response();
            }
        };
    }

    match state.pages.insert(body).await {
        Ok(page) => (StatusCode::CREATED, Json(ApiResponse::success(page))).into_response(),
        Err(err) => store_error_response(err),
    }
}

pub async fn update_page(
    _session: AdminSession,
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(body): Json<PageUpdate>,
) -> Response {
    match state.pages.update(id, body).await {
        Ok(page) => Json(ApiResponse::success(page)).into_response(),
        Err(err) => store_error_response(err),
    }
}

pub async fn delete_page(
    _session: AdminSession,
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Response {
    match state.pages.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => store_error_response(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn escapes_title_but_keeps_body_html() {
        let page = Page {
            id: Uuid::new_v4(),
            path: "/about".into(),
            title: "Faith & Hope".into(),
            body: "<p>hello</p>".into(),
            updated_at: Utc::now(),
        };
        let html = render(&page);
        assert!(html.contains("Faith &amp; Hope"));
        assert!(html.contains("<p>hello</p>"));
    }
}
