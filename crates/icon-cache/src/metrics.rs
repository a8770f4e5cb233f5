use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;

/// Counters kept by a cache instance; clones share the same counters.
#[derive(Clone, Default)]
pub struct SimpleStats {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    hits: AtomicU64,
    coalesced: AtomicU64,
    loads: AtomicU64,
    errors: AtomicU64,
    clears: AtomicU64,
}

impl SimpleStats {
    pub fn record_hit(&self) {
        self.inner.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// A caller attached to a retrieval already in flight.
    pub fn record_coalesced(&self) {
        self.inner.coalesced.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_load(&self) {
        self.inner.loads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_error(&self) {
        self.inner.errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_clear(&self) {
        self.inner.clears.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            hits: self.inner.hits.load(Ordering::Relaxed),
            coalesced: self.inner.coalesced.load(Ordering::Relaxed),
            loads: self.inner.loads.load(Ordering::Relaxed),
            errors: self.inner.errors.load(Ordering::Relaxed),
            clears: self.inner.clears.load(Ordering::Relaxed),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub hits: u64,
    pub coalesced: u64,
    pub loads: u64,
    pub errors: u64,
    pub clears: u64,
}
