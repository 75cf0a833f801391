//! End-to-end tests of the path access gate and the config publisher.

mod common;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use church_portal::config::AppConfig;
use church_portal::middleware::gate::PathAccessGate;
use church_portal::models::{ApiResponse, PathRule, PathsResponse};
use church_portal::publisher::{ConfigPublisher, DisabledPathSource, FetchError};
use church_portal::store::{MemoryNavigation, MemoryPages, PathRuleStore, StoreError};
use church_portal::{build_router_with_gate, AppState};
use serde_json::json;

use common::{login, server, server_for};

/// Disable a path through the admin API and return the created rule.
async fn disable_path(server: &TestServer, path: &str) -> PathRule {
    let created = server
        .post("/api/admin/config/paths")
        .json(&json!({ "path": path }))
        .await;
    assert_eq!(created.status_code(), StatusCode::CREATED);
    let rule = created.json::<ApiResponse<PathRule>>().data.expect("rule");

    let toggled = server
        .put(&format!("/api/admin/config/paths/{}", rule.id))
        .json(&json!({ "is_enabled": false }))
        .await;
    toggled.assert_status_ok();
    toggled.json::<ApiResponse<PathRule>>().data.expect("rule")
}

#[tokio::test]
async fn disabling_a_prefix_blocks_it_and_its_descendants() {
    let server = server();
    login(&server).await;
    disable_path(&server, "/worship").await;

    assert_eq!(server.get("/worship").await.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(server.get("/worship/teams").await.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(server.get("/worship-team").await.status_code(), StatusCode::OK);
    assert_eq!(server.get("/about").await.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn blocked_route_is_indistinguishable_from_a_missing_one() {
    let server = server();
    login(&server).await;
    disable_path(&server, "/worship").await;

    let blocked = server.get("/worship").await;
    let missing = server.get("/no-such-page").await;
    assert_eq!(blocked.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(blocked.text(), missing.text());
}

#[tokio::test]
async fn toggling_a_rule_back_restores_access() {
    let server = server();
    login(&server).await;

    assert_eq!(server.get("/about").await.status_code(), StatusCode::OK);

    let rule = disable_path(&server, "/about").await;
    assert_eq!(server.get("/about").await.status_code(), StatusCode::NOT_FOUND);

    let toggled = server
        .put(&format!("/api/admin/config/paths/{}", rule.id))
        .json(&json!({ "is_enabled": true }))
        .await;
    toggled.assert_status_ok();

    assert_eq!(server.get("/about").await.status_code(), StatusCode::OK);
}

struct SlowSource(Vec<String>);

#[async_trait]
impl DisabledPathSource for SlowSource {
    async fn disabled_paths(&self) -> Result<Vec<String>, FetchError> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(self.0.clone())
    }
}

#[tokio::test]
async fn publisher_timeout_fails_open() {
    let state = AppState::new(AppConfig::default());
    let gate = Arc::new(PathAccessGate::new(
        Arc::new(SlowSource(vec!["/about".to_string()])),
        Duration::from_millis(20),
    ));
    let app = build_router_with_gate(state, gate);
    let server = TestServer::new(app).expect("test server");

    // The source says /about is disabled, but it never answers in time.
    assert_eq!(server.get("/about").await.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn exempt_surfaces_allow_even_when_listed() {
    let server = server();
    login(&server).await;
    disable_path(&server, "/api").await;

    // /api matches the exemption prefix, so the gate never blocks it.
    assert_eq!(server.get("/api/navigation").await.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn publisher_endpoint_sets_cache_control_and_reflects_rules() {
    let server = server();

    let res = server.get("/api/admin/config/paths").await;
    res.assert_status_ok();
    assert_eq!(
        res.header("cache-control"),
        "public, s-maxage=30, stale-while-revalidate=59"
    );
    assert!(res.json::<PathsResponse>().paths.is_empty());

    login(&server).await;
    disable_path(&server, "/worship").await;

    let res = server.get("/api/admin/config/paths").await;
    res.assert_status_ok();
    assert_eq!(res.json::<PathsResponse>().paths, vec!["/worship".to_string()]);
}

struct UnavailableRules;

#[async_trait]
impl PathRuleStore for UnavailableRules {
    async fn list(&self) -> Result<Vec<PathRule>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
    async fn list_disabled(&self) -> Result<Vec<PathRule>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
    async fn insert(&self, _path: String) -> Result<PathRule, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
    async fn set_enabled(&self, _id: uuid::Uuid, _is_enabled: bool) -> Result<PathRule, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
    async fn delete(&self, _id: uuid::Uuid) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}

fn state_with_unavailable_rules() -> AppState {
    let config = AppConfig::default();
    let path_rules: Arc<dyn PathRuleStore> = Arc::new(UnavailableRules);
    let publisher = Arc::new(ConfigPublisher::new(
        Arc::clone(&path_rules),
        config.cache_ttl,
        config.cache_swr,
    ));
    AppState {
        config: Arc::new(config),
        path_rules,
        navigation: Arc::new(MemoryNavigation::with_defaults()),
        pages: Arc::new(MemoryPages::with_defaults()),
        publisher,
    }
}

#[tokio::test]
async fn unreachable_store_returns_empty_list_with_error_status() {
    let server = server_for(state_with_unavailable_rules());

    let res = server.get("/api/admin/config/paths").await;
    assert_eq!(res.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(res.json::<PathsResponse>().paths.is_empty());
}

#[tokio::test]
async fn unreachable_store_leaves_public_pages_up() {
    let server = server_for(state_with_unavailable_rules());

    // Fail open: the gate cannot evaluate, so the page still renders.
    assert_eq!(server.get("/about").await.status_code(), StatusCode::OK);
    assert_eq!(server.get("/worship").await.status_code(), StatusCode::OK);
}
