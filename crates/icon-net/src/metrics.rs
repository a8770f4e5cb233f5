use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct SourceMetrics {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    request_total: AtomicU64,
    not_found_total: AtomicU64,
    failure_total: AtomicU64,
}

impl SourceMetrics {
    pub fn record_request(&self) {
        self.inner.request_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_not_found(&self) {
        self.inner.not_found_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.inner.failure_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> SourceMetricsSnapshot {
        SourceMetricsSnapshot {
            requests: self.inner.request_total.load(Ordering::Relaxed),
            not_found: self.inner.not_found_total.load(Ordering::Relaxed),
            failures: self.inner.failure_total.load(Ordering::Relaxed),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceMetricsSnapshot {
    pub requests: u64,
    pub not_found: u64,
    pub failures: u64,
}
