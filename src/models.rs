//! API models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Standard API response envelope for admin endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ErrorResponse>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self { success: true, data: Some(data), error: None }
    }

    pub fn error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorResponse {
                code: code.to_string(),
                message: message.to_string(),
            }),
        }
    }
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

// ============ Path rules ============

/// Administrator-controlled route visibility rule.
///
/// `path` is a site-relative route prefix; disabling a rule hides the route
/// and every route under it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathRule {
    pub id: Uuid,
    pub path: String,
    pub is_enabled: bool,
    pub created_at: DateTime<Utc>,
}

/// Path rule creation request
#[derive(Debug, Serialize, Deserialize)]
pub struct PathRuleCreate {
    pub path: String,
}

/// Path rule toggle request
#[derive(Debug, Serialize, Deserialize)]
pub struct PathRuleToggle {
    pub is_enabled: bool,
}

/// Wire shape of the disabled-path read interface: `{"paths": [...]}`
#[derive(Debug, Serialize, Deserialize)]
pub struct PathsResponse {
    pub paths: Vec<String>,
}

/// Per-request outcome of evaluating a route against the disabled-path set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Block,
}

/// Rejection reasons for a rule path at the write side
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RulePathError {
    #[error("path must not be empty")]
    Empty,
    #[error("the root path cannot be disabled")]
    Root,
}

/// Normalize an administrator-supplied rule path.
///
/// A missing leading `/` is added; a trailing `/` is stripped so `/worship/`
/// and `/worship` are the same rule. Empty input and the bare root are
/// rejected, the root because disabling it would take down the home page.
pub fn normalize_rule_path(raw: &str) -> Result<String, RulePathError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(RulePathError::Empty);
    }
    let mut path = if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    };
    while path.len() > 1 && path.ends_with('/') {
        path.pop();
    }
    if path == "/" {
        return Err(RulePathError::Root);
    }
    Ok(path)
}

// ============ Navigation ============

/// Header/menu navigation entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationItem {
    pub id: Uuid,
    pub href: String,
    pub label: String,
    pub order: i32,
    pub active: bool,
}

/// Navigation item creation request
#[derive(Debug, Serialize, Deserialize)]
pub struct NavigationItemCreate {
    pub href: String,
    pub label: String,
    pub order: i32,
    #[serde(default = "default_true")]
    pub active: bool,
}

/// Navigation item update request
#[derive(Debug, Serialize, Deserialize)]
pub struct NavigationItemUpdate {
    pub href: Option<String>,
    pub label: Option<String>,
    pub order: Option<i32>,
    pub active: Option<bool>,
}

// ============ Pages ============

/// Server-rendered content page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub id: Uuid,
    pub path: String,
    pub title: String,
    pub body: String,
    pub updated_at: DateTime<Utc>,
}

/// Page creation request
#[derive(Debug, Serialize, Deserialize)]
pub struct PageCreate {
    pub path: String,
    pub title: String,
    pub body: String,
}

/// Page update request
#[derive(Debug, Serialize, Deserialize)]
pub struct PageUpdate {
    pub title: Option<String>,
    pub body: Option<String>,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_adds_leading_slash() {
        assert_eq!(normalize_rule_path("worship").unwrap(), "/worship");
        assert_eq!(normalize_rule_path("/worship").unwrap(), "/worship");
    }

    #[test]
    fn normalize_strips_trailing_slash() {
        assert_eq!(normalize_rule_path("/worship/").unwrap(), "/worship");
    }

    #[test]
    fn normalize_rejects_empty_and_root() {
        assert_eq!(normalize_rule_path("  "), Err(RulePathError::Empty));
        assert_eq!(normalize_rule_path("/"), Err(RulePathError::Root));
        assert_eq!(normalize_rule_path("///"), Err(RulePathError::Root));
    }
}
