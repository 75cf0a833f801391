//! Short-lived response cache
//!
//! Explicit TTL cache with a stale-while-revalidate window, used at the config
//! publisher boundary. Values past the TTL but inside the SWR window are still
//! served while one caller refreshes in the background; values past both
//! windows are treated as a miss.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

/// Outcome of a cache lookup
#[derive(Debug, PartialEq, Eq)]
pub enum Lookup<T> {
    Fresh(T),
    Stale(T),
    Miss,
}

struct Slot<T> {
    value: Option<(T, Instant)>,
    refreshing: bool,
    // Bumped on every store/invalidate; a refresh completion carrying an older
    // generation is dropped so it cannot reinstate a superseded value.
    generation: u64,
}

/// Single-slot TTL cache shared between request handlers.
///
/// Readers never mutate the cached value, so concurrent lookups need no
/// coordination beyond the lock around the slot itself.
pub struct TtlCache<T> {
    slot: Arc<RwLock<Slot<T>>>,
    ttl: Duration,
    swr: Duration,
}

impl<T> Clone for TtlCache<T> {
    fn clone(&self) -> Self {
        Self { slot: Arc::clone(&self.slot), ttl: self.ttl, swr: self.swr }
    }
}

impl<T: Clone> TtlCache<T> {
    pub fn new(ttl: Duration, swr: Duration) -> Self {
        Self {
            slot: Arc::new(RwLock::new(Slot { value: None, refreshing: false, generation: 0 })),
            ttl,
            swr,
        }
    }

    pub fn lookup(&self) -> Lookup<T> {
        let slot = self.slot.read();
        match &slot.value {
            Some((value, stored_at)) => {
                let age = stored_at.elapsed();
                if age <= self.ttl {
                    Lookup::Fresh(value.clone())
                } else if age <= self.ttl + self.swr {
                    Lookup::Stale(value.clone())
                } else {
                    Lookup::Miss
                }
            }
            None => Lookup::Miss,
        }
    }

    pub fn store(&self, value: T) {
        let mut slot = self.slot.write();
        slot.value = Some((value, Instant::now()));
        slot.refreshing = false;
        slot.generation += 1;
    }

    pub fn invalidate(&self) {
        let mut slot = self.slot.write();
        slot.value = None;
        slot.refreshing = false;
        slot.generation += 1;
    }

    /// Claim the refresh slot. Returns `None` if another caller already holds
    /// it, so at most one background refresh runs per staleness episode. The
    /// returned claim must be handed back to [`TtlCache::complete_refresh`].
    pub fn begin_refresh(&self) -> Option<u64> {
        let mut slot = self.slot.write();
        if slot.refreshing {
            None
        } else {
            slot.refreshing = true;
            Some(slot.generation)
        }
    }

    /// Finish a claimed refresh. The result is dropped if the slot was stored
    /// or invalidated since the claim was taken.
    pub fn complete_refresh(&self, claim: u64, value: T) {
        let mut slot = self.slot.write();
        if slot.generation != claim {
            return;
        }
        slot.value = Some((value, Instant::now()));
        slot.refreshing = false;
        slot.generation += 1;
    }

    pub fn end_refresh(&self) {
        self.slot.write().refreshing = false;
    }
}
