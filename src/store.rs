//! Row stores
//!
//! The persistence layer is treated as an opaque row store behind small async
//! traits so handlers and the config publisher never depend on a concrete
//! engine. The in-memory implementations back the binary and the tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{
    NavigationItem, NavigationItemCreate, NavigationItemUpdate, Page, PageCreate, PageUpdate,
    PathRule,
};

/// Store error taxonomy
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("record already exists")]
    Duplicate,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Path rule persistence. The gate never mutates through this trait; only the
/// admin write interface does.
#[async_trait]
pub trait PathRuleStore: Send + Sync {
    async fn list(&self) -> Result<Vec<PathRule>, StoreError>;
    async fn list_disabled(&self) -> Result<Vec<PathRule>, StoreError>;
    async fn insert(&self, path: String) -> Result<PathRule, StoreError>;
    async fn set_enabled(&self, id: Uuid, is_enabled: bool) -> Result<PathRule, StoreError>;
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

#[async_trait]
pub trait NavigationStore: Send + Sync {
    async fn list(&self, include_inactive: bool) -> Result<Vec<NavigationItem>, StoreError>;
    async fn insert(&self, item: NavigationItemCreate) -> Result<NavigationItem, StoreError>;
    async fn update(
        &self,
        id: Uuid,
        update: NavigationItemUpdate,
    ) -> Result<NavigationItem, StoreError>;
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

#[async_trait]
pub trait PageStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Page>, StoreError>;
    async fn find_by_path(&self, path: &str) -> Result<Option<Page>, StoreError>;
    async fn insert(&self, page: PageCreate) -> Result<Page, StoreError>;
    async fn update(&self, id: Uuid, update: PageUpdate) -> Result<Page, StoreError>;
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

// ============ In-memory implementations ============

#[derive(Default)]
pub struct MemoryPathRules {
    rules: Arc<RwLock<Vec<PathRule>>>,
}

impl MemoryPathRules {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PathRuleStore for MemoryPathRules {
    async fn list(&self) -> Result<Vec<PathRule>, StoreError> {
        Ok(self.rules.read().await.clone())
    }

    async fn list_disabled(&self) -> Result<Vec<PathRule>, StoreError> {
        let rules = self.rules.read().await;
        Ok(rules.iter().filter(|r| !r.is_enabled).cloned().collect())
    }

    async fn insert(&self, path: String) -> Result<PathRule, StoreError> {
        let mut rules = self.rules.write().await;
        if rules.iter().any(|r| r.path == path) {
            return Err(StoreError::Duplicate);
        }
        let rule = PathRule {
            id: Uuid::new_v4(),
            path,
            is_enabled: true,
            created_at: Utc::now(),
        };
        rules.push(rule.clone());
        Ok(rule)
    }

    async fn set_enabled(&self, id: Uuid, is_enabled: bool) -> Result<PathRule, StoreError> {
        let mut rules = self.rules.write().await;
        let rule = rules
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound)?;
        rule.is_enabled = is_enabled;
        Ok(rule.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut rules = self.rules.write().await;
        let before = rules.len();
        rules.retain(|r| r.id != id);
        if rules.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryNavigation {
    items: Arc<RwLock<Vec<NavigationItem>>>,
}

impl MemoryNavigation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with the default site menu.
    pub fn with_defaults() -> Self {
        let items = [
            ("/", "Home", 0),
            ("/about", "About Us", 1),
            ("/worship", "Worship", 2),
            ("/missions", "Missions", 3),
            ("/projects", "Projects", 4),
            ("/bulletins", "Bulletins", 5),
            ("/financial", "Financial", 6),
            ("/contact", "Contact", 7),
        ]
        .into_iter()
        .map(|(href, label, order)| NavigationItem {
            id: Uuid::new_v4(),
            href: href.to_string(),
            label: label.to_string(),
            order,
            active: true,
        })
        .collect();
        Self { items: Arc::new(RwLock::new(items)) }
    }
}

#[async_trait]
impl NavigationStore for MemoryNavigation {
    async fn list(&self, include_inactive: bool) -> Result<Vec<NavigationItem>, StoreError> {
        let items = self.items.read().await;
        let mut out: Vec<NavigationItem> = items
            .iter()
            .filter(|i| include_inactive || i.active)
            .cloned()
            .collect();
        out.sort_by_key(|i| i.order);
        Ok(out)
    }

    async fn insert(&self, item: NavigationItemCreate) -> Result<NavigationItem, StoreError> {
        let created = NavigationItem {
            id: Uuid::new_v4(),
            href: item.href,
            label: item.label,
            order: item.order,
            active: item.active,
        };
        self.items.write().await.push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: Uuid,
        update: NavigationItemUpdate,
    ) -> Result<NavigationItem, StoreError> {
        let mut items = self.items.write().await;
        let item = items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(StoreError::NotFound)?;
        if let Some(href) = update.href {
            item.href = href;
        }
        if let Some(label) = update.label {
            item.label = label;
        }
        if let Some(order) = update.order {
            item.order = order;
        }
        if let Some(active) = update.active {
            item.active = active;
        }
        Ok(item.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|i| i.id != id);
        if items.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryPages {
    pages: Arc<RwLock<Vec<Page>>>,
}

impl MemoryPages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with the public site pages.
    pub fn with_defaults() -> Self {
        let pages = [
            ("/", "Home", "<p>Welcome to our church.</p>"),
            ("/about", "About Us", "<p>Who we are and what we believe.</p>"),
            ("/worship", "Worship", "<p>Sunday services and worship life.</p>"),
            ("/worship/teams", "Worship Teams", "<p>Serve on a worship team.</p>"),
            ("/worship-team", "Worship Team Sign-up", "<p>Join the team.</p>"),
            ("/missions", "Missions", "<p>Local and global mission work.</p>"),
            ("/projects", "Projects", "<p>Building and community projects.</p>"),
            ("/bulletins", "Bulletins", "<p>Weekly bulletins.</p>"),
            ("/financial", "Financial", "<p>Financial transparency reports.</p>"),
            ("/contact", "Contact", "<p>Get in touch.</p>"),
        ]
        .into_iter()
        .map(|(path, title, body)| Page {
            id: Uuid::new_v4(),
            path: path.to_string(),
            title: title.to_string(),
            body: body.to_string(),
            updated_at: Utc::now(),
        })
        .collect();
        Self { pages: Arc::new(RwLock::new(pages)) }
    }
}

#[async_trait]
impl PageStore for MemoryPages {
    async fn list(&self) -> Result<Vec<Page>, StoreError> {
        Ok(self.pages.read().await.clone())
    }

    async fn find_by_path(&self, path: &str) -> Result<Option<Page>, StoreError> {
        let pages = self.pages.read().await;
        Ok(pages.iter().find(|p| p.path == path).cloned())
    }

    async fn insert(&self, page: PageCreate) -> Result<Page, StoreError> {
        let mut pages = self.pages.write().await;
        if pages.iter().any(|p| p.path == page.path) {
            return Err(StoreError::Duplicate);
        }
        let created = Page {
            id: Uuid::new_v4(),
            path: page.path,
            title: page.title,
            body: page.body,
            updated_at: Utc::now(),
        };
        pages.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: Uuid, update: PageUpdate) -> Result<Page, StoreError> {
        let mut pages = self.pages.write().await;
        let page = pages
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound)?;
        if let Some(title) = update.title {
            page.title = title;
        }
        if let Some(body) = update.body {
            page.body = body;
        }
        page.updated_at = Utc::now();
        Ok(page.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut pages = self.pages.write().await;
        let before = pages.len();
        pages.retain(|p| p.id != id);
        if pages.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn path_rules_enforce_unique_paths() {
        let store = MemoryPathRules::new();
        store.insert("/worship".into()).await.unwrap();
        let err = store.insert("/worship".into()).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate));
    }

    #[tokio::test]
    async fn disabled_projection_only_returns_disabled_rules() {
        let store = MemoryPathRules::new();
        let a = store.insert("/worship".into()).await.unwrap();
        store.insert("/about".into()).await.unwrap();
        store.set_enabled(a.id, false).await.unwrap();

        let disabled = store.list_disabled().await.unwrap();
        assert_eq!(disabled.len(), 1);
        assert_eq!(disabled[0].path, "/worship");
    }

    #[tokio::test]
    async fn navigation_list_filters_and_orders() {
        let store = MemoryNavigation::with_defaults();
        let all = store.list(true).await.unwrap();
        let hidden = all[2].id;
        store
            .update(
                hidden,
                NavigationItemUpdate { href: None, label: None, order: None, active: Some(false) },
            )
            .await
            .unwrap();

        let visible = store.list(false).await.unwrap();
        assert_eq!(visible.len(), all.len() - 1);
        assert!(visible.windows(2).all(|w| w[0].order <= w[1].order));
    }
}
