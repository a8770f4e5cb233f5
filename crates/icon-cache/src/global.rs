//! Optional process-wide instance for callers that cannot thread a cache
//! handle through. Independent instances remain available via
//! [`IconAssetCache::new`].

use once_cell::sync::OnceCell;

use crate::cache::IconAssetCache;

static DEFAULT_CACHE: OnceCell<IconAssetCache> = OnceCell::new();

/// Installs the process-wide cache. Fails with the rejected cache if one is
/// already installed.
pub fn install_default(cache: IconAssetCache) -> Result<(), IconAssetCache> {
    DEFAULT_CACHE.set(cache)
}

pub fn default_cache() -> Option<IconAssetCache> {
    DEFAULT_CACHE.get().cloned()
}
