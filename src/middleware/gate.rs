//! Path access gate
//!
//! Request-time interceptor that hides administrator-disabled routes. Every
//! inbound request to a public page is checked against the disabled-path set;
//! blocked routes get the not-found page and the inner handler never runs.
//!
//! The fetch to the config publisher is bounded by a hard timeout, and every
//! failure mode (timeout, store error, malformed payload) collapses to Allow.
//! An unreachable configuration source must never take down otherwise-healthy
//! public pages; availability wins over strict enforcement here.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::models::AccessDecision;
use crate::publisher::DisabledPathSource;
use crate::routes::pages;

/// Surfaces never subject to the gate: static assets, the API, the admin
/// section, and anything with a file extension.
const EXEMPT_PREFIXES: &[&str] = &["/static", "/api", "/admin"];

pub struct PathAccessGate {
    source: Arc<dyn DisabledPathSource>,
    timeout: Duration,
}

impl PathAccessGate {
    pub fn new(source: Arc<dyn DisabledPathSource>, timeout: Duration) -> Self {
        Self { source, timeout }
    }

    /// Decide whether a request to `path` may proceed. Stateless across
    /// requests; concurrent evaluations share nothing mutable.
    pub async fn evaluate(&self, path: &str) -> AccessDecision {
        if is_exempt(path) {
            return AccessDecision::Allow;
        }

        match tokio::time::timeout(self.timeout, self.source.disabled_paths()).await {
            Ok(Ok(disabled)) => {
                if is_blocked(path, &disabled) {
                    AccessDecision::Block
                } else {
                    AccessDecision::Allow
                }
            }
            Ok(Err(err)) => {
                // Fail open: the next request simply re-fetches.
                tracing::debug!(%err, path, "disabled-path fetch failed, allowing request");
                AccessDecision::Allow
            }
            Err(_) => {
                tracing::debug!(path, "disabled-path fetch timed out, allowing request");
                AccessDecision::Allow
            }
        }
    }
}

fn is_exempt(path: &str) -> bool {
    EXEMPT_PREFIXES.iter().any(|prefix| path.starts_with(prefix)) || path.contains('.')
}

/// Prefix containment with a path-separator boundary: disabling `/worship`
/// blocks `/worship` and `/worship/teams` but never `/worship-team`.
fn is_blocked(path: &str, disabled: &[String]) -> bool {
    disabled.iter().any(|rule| {
        path == rule
            || path
                .strip_prefix(rule.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

/// Middleware entry point, composed into the router at startup.
pub async fn access_gate(
    State(gate): State<Arc<PathAccessGate>>,
    request: Request,
    next: Next,
) -> Response {
    match gate.evaluate(request.uri().path()).await {
        AccessDecision::Allow => next.run(request).await,
        AccessDecision::Block => pages::not_found().into_response(),
    }
}
