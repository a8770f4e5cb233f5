//! HTTP retrieval source: `GET <base_url>/<variant>/<name>.<ext>`.

pub mod client;
pub mod config;
pub mod errors;
pub mod metrics;

pub use client::HttpSource;
pub use config::HttpSourceConfig;
pub use errors::NetError;
pub use metrics::{SourceMetrics, SourceMetricsSnapshot};
