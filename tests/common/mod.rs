//! Shared test helpers

use axum_test::{TestServer, TestServerConfig};
use church_portal::config::AppConfig;
use church_portal::{build_router, AppState};
use serde_json::json;

pub fn server_for(state: AppState) -> TestServer {
    let config = TestServerConfig {
        save_cookies: true,
        ..TestServerConfig::default()
    };
    TestServer::new_with_config(build_router(state), config).expect("test server")
}

pub fn server() -> TestServer {
    server_for(AppState::new(AppConfig::default()))
}

pub async fn login(server: &TestServer) {
    let res = server
        .post("/api/admin/login")
        .json(&json!({ "username": "admin", "password": "changeme" }))
        .await;
    res.assert_status_ok();
}
