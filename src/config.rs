//! Runtime configuration
//!
//! Everything is environment-driven with sensible defaults so the binary runs
//! without any setup in development.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub admin_username: String,
    pub admin_password: String,
    pub session_secret: String,
    /// Hard bound on the gate's fetch of the disabled-path set.
    pub gate_timeout: Duration,
    /// Freshness window of the publisher cache.
    pub cache_ttl: Duration,
    /// Stale-while-revalidate window past the TTL.
    pub cache_swr: Duration,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: env_or("BIND_ADDR", "0.0.0.0:8080"),
            admin_username: env_or("ADMIN_USERNAME", "admin"),
            admin_password: env_or("ADMIN_PASSWORD", "changeme"),
            session_secret: env_or("SESSION_SECRET", "church-portal-secret-change-in-production"),
            gate_timeout: Duration::from_millis(env_parse_or("GATE_TIMEOUT_MS", 1500)),
            cache_ttl: Duration::from_secs(env_parse_or("PATHS_CACHE_TTL_SECS", 30)),
            cache_swr: Duration::from_secs(env_parse_or("PATHS_CACHE_SWR_SECS", 59)),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".into(),
            admin_username: "admin".into(),
            admin_password: "changeme".into(),
            session_secret: "church-portal-secret-change-in-production".into(),
            gate_timeout: Duration::from_millis(1500),
            cache_ttl: Duration::from_secs(30),
            cache_swr: Duration::from_secs(59),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse_or(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
