//! Church content site backend
//!
//! Public content pages backed by an admin API, with a path access gate in
//! front of the public surface. Administrators can disable any route prefix;
//! the gate consults the config publisher's disabled-path set on each request
//! and rewrites blocked routes to the not-found page. The publisher read is
//! bounded by a short timeout and fails open, so an unreachable configuration
//! store never takes the public site down.

pub mod cache;
pub mod config;
pub mod middleware;
pub mod models;
pub mod publisher;
pub mod routes;
pub mod store;

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::middleware::gate::PathAccessGate;
use crate::publisher::{ConfigPublisher, DisabledPathSource};
use crate::store::{
    MemoryNavigation, MemoryPages, MemoryPathRules, NavigationStore, PageStore, PathRuleStore,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub path_rules: Arc<dyn PathRuleStore>,
    pub navigation: Arc<dyn NavigationStore>,
    pub pages: Arc<dyn PageStore>,
    pub publisher: Arc<ConfigPublisher>,
}

impl AppState {
    /// State over the in-memory stores, seeded with default site content.
    pub fn new(config: AppConfig) -> Self {
        let path_rules: Arc<dyn PathRuleStore> = Arc::new(MemoryPathRules::new());
        let publisher = Arc::new(ConfigPublisher::new(
            Arc::clone(&path_rules),
            config.cache_ttl,
            config.cache_swr,
        ));
        Self {
            config: Arc::new(config),
            path_rules,
            navigation: Arc::new(MemoryNavigation::with_defaults()),
            pages: Arc::new(MemoryPages::with_defaults()),
            publisher,
        }
    }
}

/// Build the full router with the access gate wired to the state's publisher.
pub fn build_router(state: AppState) -> Router {
    let gate = Arc::new(PathAccessGate::new(
        Arc::clone(&state.publisher) as Arc<dyn DisabledPathSource>,
        state.config.gate_timeout,
    ));
    build_router_with_gate(state, gate)
}

/// Build the router with an explicit gate, so tests can substitute a gate
/// backed by a fake or slow publisher.
pub fn build_router_with_gate(state: AppState, gate: Arc<PathAccessGate>) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        // Public API
        .route("/api/navigation", get(routes::navigation::public_list))
        // Admin session
        .route("/api/admin/login", post(routes::auth::login))
        .route("/api/admin/logout", post(routes::auth::logout))
        // Path rules: public read (consumed by the gate), admin writes
        .route(
            "/api/admin/config/paths",
            get(routes::config_paths::disabled_paths).post(routes::config_paths::create_rule),
        )
        .route("/api/admin/config/paths/rules", get(routes::config_paths::list_rules))
        .route(
            "/api/admin/config/paths/:id",
            put(routes::config_paths::toggle_rule).delete(routes::config_paths::delete_rule),
        )
        // Navigation admin
        .route(
            "/api/admin/navigation",
            get(routes::navigation::admin_list).post(routes::navigation::create_item),
        )
        .route(
            "/api/admin/navigation/:id",
            put(routes::navigation::update_item).delete(routes::navigation::delete_item),
        )
        // Pages admin
        .route(
            "/api/admin/pages",
            get(routes::pages::admin_list).post(routes::pages::create_page),
        )
        .route(
            "/api/admin/pages/:id",
            put(routes::pages::update_page).delete(routes::pages::delete_page),
        )
        // Everything else is a public content page
        .fallback(routes::pages::render_page)
        // The gate wraps the whole surface; its own exemptions skip the API,
        // the admin section, static assets, and dotted paths.
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(axum::middleware::from_fn_with_state(
                    gate,
                    middleware::gate::access_gate,
                )),
        )
        .with_state(state)
}
