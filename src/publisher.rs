//! Config publisher
//!
//! Read path for the disabled-path set. The gate (and any other consumer)
//! reads through [`DisabledPathSource`] instead of touching the rule store
//! directly, so a fake source can stand in during tests. Results are cached
//! for a short window with stale-while-revalidate semantics; rule writes
//! invalidate the cache so changes propagate immediately.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::cache::{Lookup, TtlCache};
use crate::store::{PathRuleStore, StoreError};

/// Failure modes when reading the disabled-path set.
///
/// `Malformed` belongs to the seam's contract rather than to
/// [`ConfigPublisher`]: an out-of-process source (a remote publisher whose
/// payload fails to decode) reports it, and the gate treats it like any other
/// fetch failure. The in-process publisher only produces `Store`.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("configuration store unavailable: {0}")]
    Store(#[from] StoreError),
    #[error("malformed disabled-path payload")]
    Malformed,
}

/// Anything that can produce the current disabled-path set.
#[async_trait]
pub trait DisabledPathSource: Send + Sync {
    async fn disabled_paths(&self) -> Result<Vec<String>, FetchError>;
}

/// Serves the disabled-path projection of the rule store, cached briefly.
pub struct ConfigPublisher {
    store: Arc<dyn PathRuleStore>,
    cache: TtlCache<Vec<String>>,
}

impl ConfigPublisher {
    pub fn new(store: Arc<dyn PathRuleStore>, ttl: Duration, swr: Duration) -> Self {
        Self { store, cache: TtlCache::new(ttl, swr) }
    }

    /// Drop the cached set. Called by the admin write interface after every
    /// rule mutation.
    pub fn invalidate(&self) {
        self.cache.invalidate();
    }
}

async fn read_disabled(store: &dyn PathRuleStore) -> Result<Vec<String>, FetchError> {
    let rules = store.list_disabled().await?;
    Ok(rules.into_iter().map(|r| r.path).collect())
}

#[async_trait]
impl DisabledPathSource for ConfigPublisher {
    async fn disabled_paths(&self) -> Result<Vec<String>, FetchError> {
        match self.cache.lookup() {
            Lookup::Fresh(paths) => Ok(paths),
            Lookup::Stale(paths) => {
                // Serve the stale set; one caller refreshes in the background.
                // The claim ties the refresh to the current cache generation,
                // so a rule write that invalidates mid-flight wins.
                if let Some(claim) = self.cache.begin_refresh() {
                    let store = Arc::clone(&self.store);
                    let cache = self.cache.clone();
                    tokio::spawn(async move {
                        match read_disabled(store.as_ref()).await {
                            Ok(fresh) => cache.complete_refresh(claim, fresh),
                            Err(err) => {
                                tracing::debug!(%err, "background refresh of disabled paths failed");
                                cache.end_refresh();
                            }
                        }
                    });
                }
                Ok(paths)
            }
            Lookup::Miss => {
                let paths = read_disabled(self.store.as_ref()).await?;
                self.cache.store(paths.clone());
                Ok(paths)
            }
        }
    }
}
