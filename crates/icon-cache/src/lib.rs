//! In-process cache for small text assets such as SVG icon bodies.
//!
//! Assets are addressed by a `(variant, name)` pair. Concurrent requests for
//! the same pair share a single retrieval, successful bodies are memoized
//! until cleared, and failures are handed to every waiter without being
//! remembered.

pub mod cache;
pub mod errors;
pub mod global;
pub mod key;
pub mod metrics;
pub mod prelude;
pub mod source;

pub use cache::{IconAssetCache, IconBody, PreloadSummary};
pub use errors::IconError;
pub use global::{default_cache, install_default};
pub use key::{build_key, CacheKey, KeyParts};
pub use metrics::{SimpleStats, StatsSnapshot};
pub use source::{AssetSource, DirSource, FnSource, SourceHandle};
