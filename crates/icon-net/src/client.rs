use std::time::Duration;

use async_trait::async_trait;
use icon_asset_cache::{AssetSource, IconError, KeyParts};
use url::Url;

use crate::config::HttpSourceConfig;
use crate::errors::NetError;
use crate::metrics::SourceMetrics;

const TARGET: &str = "iconcache::net";

#[derive(Clone)]
pub struct HttpSource {
    base: Url,
    extension: String,
    client: reqwest::Client,
    metrics: SourceMetrics,
}

impl HttpSource {
    pub fn new(config: HttpSourceConfig) -> Result<Self, NetError> {
        let client = build_reqwest_client(&config)?;
        Self::with_client(config, client)
    }

    /// Uses a caller-supplied client; `timeout_ms` and `user_agent` from the
    /// config are then ignored.
    pub fn with_client(config: HttpSourceConfig, client: reqwest::Client) -> Result<Self, NetError> {
        let base = Url::parse(&config.base_url).map_err(|err| NetError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: err.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(NetError::InvalidBaseUrl {
                url: config.base_url,
                reason: "url cannot carry path segments".to_string(),
            });
        }
        Ok(Self {
            base,
            extension: config.extension,
            client,
            metrics: SourceMetrics::default(),
        })
    }

    pub fn with_metrics(mut self, metrics: SourceMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &SourceMetrics {
        &self.metrics
    }

    /// Each identifier becomes one percent-encoded path segment; `None` for
    /// identifiers that would not survive as a segment.
    pub fn url_for(&self, parts: &KeyParts) -> Option<Url> {
        if !is_segment(&parts.variant) || !is_segment(&parts.name) {
            return None;
        }
        let file = if self.extension.is_empty() {
            parts.name.clone()
        } else {
            format!("{}.{}", parts.name, self.extension)
        };
        let mut url = self.base.clone();
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .push(&parts.variant)
            .push(&file);
        Some(url)
    }
}

fn is_segment(value: &str) -> bool {
    !value.is_empty() && value != "." && value != ".."
}

#[async_trait]
impl AssetSource for HttpSource {
    async fn retrieve(&self, parts: &KeyParts) -> Result<String, IconError> {
        let Some(url) = self.url_for(parts) else {
            return Err(IconError::not_found(parts.key()));
        };

        self.metrics.record_request();
        tracing::debug!(target: TARGET, %url, "requesting asset");

        let response = self.client.get(url.clone()).send().await.map_err(|err| {
            self.metrics.record_failure();
            IconError::transport(format!("GET {url}: {err}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            self.metrics.record_not_found();
            tracing::debug!(target: TARGET, %url, status = status.as_u16(), "asset unavailable");
            return Err(IconError::not_found_with_status(parts.key(), status.as_u16()));
        }

        response.text().await.map_err(|err| {
            self.metrics.record_failure();
            IconError::transport(format!("GET {url}: body error: {err}"))
        })
    }
}

fn build_reqwest_client(config: &HttpSourceConfig) -> Result<reqwest::Client, NetError> {
    let mut builder = reqwest::Client::builder()
        .use_rustls_tls()
        .tcp_keepalive(Some(Duration::from_secs(30)))
        .connect_timeout(Duration::from_secs(10));

    if config.timeout_ms > 0 {
        builder = builder.timeout(Duration::from_millis(config.timeout_ms));
    }
    if !config.user_agent.is_empty() {
        builder = builder.user_agent(config.user_agent.clone());
    }

    builder
        .build()
        .map_err(|err| NetError::Client(err.to_string()))
}
