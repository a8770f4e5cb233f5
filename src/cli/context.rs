use anyhow::Result;
use icon_asset_cache::IconAssetCache;

use super::output::OutputFormat;
use crate::config::AppConfig;

pub struct CliContext {
    config: AppConfig,
    output: OutputFormat,
}

impl CliContext {
    pub fn new(config: AppConfig, output: OutputFormat) -> Self {
        Self { config, output }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn output(&self) -> OutputFormat {
        self.output
    }

    pub fn cache(&self) -> Result<IconAssetCache> {
        Ok(IconAssetCache::new(self.config.build_source()?))
    }
}
