use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use futures::future::{join_all, BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use serde::Serialize;

use crate::errors::IconError;
use crate::key::{CacheKey, KeyParts};
use crate::metrics::{SimpleStats, StatsSnapshot};
use crate::source::{AssetSource, SourceHandle};

const TARGET: &str = "iconcache::cache";

/// Body of a resolved asset. Cloning shares the stored text.
pub type IconBody = Arc<str>;

type FetchOutcome = Result<IconBody, IconError>;
type PendingFetch = Shared<BoxFuture<'static, FetchOutcome>>;

#[derive(Default)]
struct State {
    resolved: HashMap<CacheKey, IconBody>,
    pending: HashMap<CacheKey, PendingFetch>,
}

enum Lookup {
    Resolved(IconBody),
    Pending(PendingFetch),
}

/// Outcome of [`IconAssetCache::preload`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PreloadSummary {
    pub resolved: usize,
    pub failed: usize,
}

/// Memoizing fetcher that runs at most one retrieval per key at a time.
///
/// Successful bodies are kept until [`clear`](Self::clear); failures are never
/// remembered, so the next fetch for a failed key retries from scratch.
/// Retrievals are spawned on the ambient tokio runtime and run to completion
/// even if every waiter goes away.
#[derive(Clone)]
pub struct IconAssetCache {
    source: SourceHandle,
    state: Arc<Mutex<State>>,
    stats: SimpleStats,
}

impl IconAssetCache {
    pub fn new(source: SourceHandle) -> Self {
        Self {
            source,
            state: Arc::new(Mutex::new(State::default())),
            stats: SimpleStats::default(),
        }
    }

    pub fn from_source<S>(source: S) -> Self
    where
        S: AssetSource + 'static,
    {
        Self::new(Arc::new(source))
    }

    pub fn with_stats(mut self, stats: SimpleStats) -> Self {
        self.stats = stats;
        self
    }

    pub async fn fetch(&self, name: &str, variant: &str) -> Result<IconBody, IconError> {
        self.fetch_parts(KeyParts::new(variant, name)).await
    }

    pub async fn fetch_parts(&self, parts: KeyParts) -> Result<IconBody, IconError> {
        match self.lookup_or_start(parts) {
            Lookup::Resolved(body) => Ok(body),
            Lookup::Pending(pending) => pending.await,
        }
    }

    /// Resolved body only; never starts a retrieval and ignores in-flight ones.
    pub fn peek(&self, name: &str, variant: &str) -> Option<IconBody> {
        let key = KeyParts::new(variant, name).key();
        self.state.lock().resolved.get(&key).cloned()
    }

    pub fn is_pending(&self, name: &str, variant: &str) -> bool {
        let key = KeyParts::new(variant, name).key();
        self.state.lock().pending.contains_key(&key)
    }

    /// Fetches every `(name, variant)` pair concurrently and waits for all of
    /// them to settle. Individual failures are logged and counted only.
    pub async fn preload<I, N, V>(&self, items: I) -> PreloadSummary
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        let fetches = items.into_iter().map(|(name, variant)| {
            let parts = KeyParts::new(variant, name);
            async move {
                match self.fetch_parts(parts.clone()).await {
                    Ok(_) => true,
                    Err(err) => {
                        tracing::debug!(target: TARGET, asset = %parts, "preload skipped: {err}");
                        false
                    }
                }
            }
        });

        let mut summary = PreloadSummary::default();
        for ok in join_all(fetches).await {
            if ok {
                summary.resolved += 1;
            } else {
                summary.failed += 1;
            }
        }
        summary
    }

    /// Drops every resolved body. Retrievals in flight are left alone and
    /// still store their result when they settle.
    pub fn clear(&self) {
        let dropped = {
            let mut state = self.state.lock();
            let dropped = state.resolved.len();
            state.resolved.clear();
            dropped
        };
        self.stats.record_clear();
        tracing::debug!(target: TARGET, dropped, "cache cleared");
    }

    pub fn len(&self) -> usize {
        self.state.lock().resolved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    pub fn source(&self) -> &SourceHandle {
        &self.source
    }

    fn lookup_or_start(&self, parts: KeyParts) -> Lookup {
        let key = parts.key();
        let mut state = self.state.lock();

        if let Some(body) = state.resolved.get(&key) {
            self.stats.record_hit();
            return Lookup::Resolved(body.clone());
        }

        if let Some(pending) = state.pending.get(&key) {
            self.stats.record_coalesced();
            tracing::trace!(target: TARGET, %key, "joining in-flight retrieval");
            return Lookup::Pending(pending.clone());
        }

        self.stats.record_load();
        tracing::debug!(target: TARGET, %key, "cache miss, starting retrieval");
        let pending = self.spawn_retrieval(key.clone(), parts);
        state.pending.insert(key, pending.clone());
        Lookup::Pending(pending)
    }

    fn spawn_retrieval(&self, key: CacheKey, parts: KeyParts) -> PendingFetch {
        let source = self.source.clone();
        let settlement = Settlement {
            state: self.state.clone(),
            stats: self.stats.clone(),
            key,
            settled: false,
        };

        let task = tokio::spawn(async move {
            let outcome = source.retrieve(&parts).await.map(IconBody::from);
            settlement.complete(&outcome);
            outcome
        });

        task.map(|joined| match joined {
            Ok(outcome) => outcome,
            Err(err) => Err(IconError::internal(format!("retrieval task failed: {err}"))),
        })
        .boxed()
        .shared()
    }
}

impl fmt::Debug for IconAssetCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("IconAssetCache")
            .field("resolved", &state.resolved.len())
            .field("pending", &state.pending.len())
            .finish()
    }
}

/// Removes the pending handle of one retrieval exactly once, including when
/// the retrieval panics.
struct Settlement {
    state: Arc<Mutex<State>>,
    stats: SimpleStats,
    key: CacheKey,
    settled: bool,
}

impl Settlement {
    fn complete(mut self, outcome: &FetchOutcome) {
        {
            let mut state = self.state.lock();
            if let Ok(body) = outcome {
                state.resolved.insert(self.key.clone(), body.clone());
            }
            state.pending.remove(&self.key);
        }
        self.settled = true;

        match outcome {
            Ok(body) => {
                tracing::debug!(target: TARGET, key = %self.key, bytes = body.len(), "asset resolved");
            }
            Err(err) => {
                self.stats.record_error();
                tracing::debug!(target: TARGET, key = %self.key, "retrieval failed: {err}");
            }
        }
    }
}

impl Drop for Settlement {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        self.state.lock().pending.remove(&self.key);
        self.stats.record_error();
        tracing::warn!(target: TARGET, key = %self.key, "retrieval aborted before settling");
    }
}
