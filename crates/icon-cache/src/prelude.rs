pub use crate::cache::{IconAssetCache, IconBody, PreloadSummary};
pub use crate::errors::IconError;
pub use crate::global::{default_cache, install_default};
pub use crate::key::{build_key, CacheKey, KeyParts};
pub use crate::metrics::{SimpleStats, StatsSnapshot};
pub use crate::source::{AssetSource, DirSource, FnSource, SourceHandle};
