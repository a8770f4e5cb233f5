//! Configuration management module
//!
//! Layers built-in defaults, an optional YAML file and `ICONCACHE_*`
//! environment variables using the `config` crate.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use icon_asset_cache::{DirSource, SourceHandle};
use icon_asset_net::{HttpSource, HttpSourceConfig};
use serde::{Deserialize, Serialize};

pub const ENV_PREFIX: &str = "ICONCACHE";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Http,
    Dir,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub kind: SourceKind,
    pub base_url: Option<String>,
    pub asset_dir: Option<PathBuf>,
    pub extension: String,
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        let http = HttpSourceConfig::default();
        Self {
            kind: SourceKind::Http,
            base_url: Some(http.base_url),
            asset_dir: None,
            extension: http.extension,
            timeout_ms: http.timeout_ms,
            user_agent: http.user_agent,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub source: SourceConfig,
}

impl AppConfig {
    /// Loads `path` if given (it must exist), otherwise the per-user default
    /// file when present, then applies environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    bail!("configuration file {} does not exist", path.display());
                }
                builder = builder.add_source(
                    config::File::from(path.to_path_buf()).format(config::FileFormat::Yaml),
                );
            }
            None => {
                if let Some(default_path) = default_config_path() {
                    builder = builder.add_source(
                        config::File::from(default_path)
                            .format(config::FileFormat::Yaml)
                            .required(false),
                    );
                }
            }
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder
            .build()
            .context("Failed to assemble configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Command-line locations win over file and environment; the last one
    /// given also selects the source kind.
    pub fn apply_overrides(&mut self, base_url: Option<String>, asset_dir: Option<PathBuf>) {
        if let Some(url) = base_url {
            self.source.base_url = Some(url);
            self.source.kind = SourceKind::Http;
        }
        if let Some(dir) = asset_dir {
            self.source.asset_dir = Some(dir);
            self.source.kind = SourceKind::Dir;
        }
    }

    pub fn build_source(&self) -> Result<SourceHandle> {
        let source = &self.source;
        match source.kind {
            SourceKind::Http => {
                let Some(base_url) = source.base_url.clone() else {
                    bail!("source.kind is http but source.base_url is not set");
                };
                let http = HttpSource::new(HttpSourceConfig {
                    base_url,
                    extension: source.extension.clone(),
                    timeout_ms: source.timeout_ms,
                    user_agent: source.user_agent.clone(),
                })
                .context("Failed to build http source")?;
                Ok(Arc::new(http))
            }
            SourceKind::Dir => {
                let Some(dir) = source.asset_dir.clone() else {
                    bail!("source.kind is dir but source.asset_dir is not set");
                };
                Ok(Arc::new(
                    DirSource::new(dir).with_extension(source.extension.clone()),
                ))
            }
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    let mut path = dirs::config_dir()?;
    path.push("iconcache");
    path.push("config.yaml");
    Some(path)
}
