//! Configuration for the HTTP source.

use serde::{Deserialize, Serialize};

pub const DEFAULT_USER_AGENT: &str = concat!("iconcache/", env!("CARGO_PKG_VERSION"));

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSourceConfig {
    /// Route under which icon sets are served, e.g. `https://cdn.example.com/icons`.
    pub base_url: String,
    /// Appended to the icon name; empty for none.
    pub extension: String,
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl HttpSourceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000/icons".to_string(),
            extension: "svg".to_string(),
            timeout_ms: 10_000,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}
