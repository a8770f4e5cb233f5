use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use icon_asset_cache::{KeyParts, PreloadSummary};
use serde::Serialize;
use tracing::info;

use super::context::CliContext;
use super::output::emit;

#[derive(Args, Clone, Debug)]
pub struct PreloadArgs {
    /// Assets as `variant:name`
    #[arg(value_parser = parse_target)]
    pub targets: Vec<KeyParts>,

    /// Read additional `variant:name` lines from a file (`#` starts a comment)
    #[arg(long, value_name = "FILE")]
    pub from_file: Option<PathBuf>,
}

#[derive(Serialize)]
struct PreloadOutput {
    #[serde(flatten)]
    summary: PreloadSummary,
    assets: Vec<AssetStatus>,
}

#[derive(Serialize)]
struct AssetStatus {
    asset: String,
    cached: bool,
}

pub fn parse_target(raw: &str) -> Result<KeyParts, String> {
    let (variant, name) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected variant:name, got {raw:?}"))?;
    if variant.is_empty() || name.is_empty() {
        return Err(format!("variant and name must be non-empty in {raw:?}"));
    }
    Ok(KeyParts::new(variant, name))
}

pub async fn cmd_preload(args: PreloadArgs, ctx: &CliContext) -> Result<()> {
    let mut targets = args.targets;
    if let Some(path) = &args.from_file {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let parts = parse_target(line)
                .map_err(|err| anyhow::anyhow!("{}:{}: {err}", path.display(), line_no + 1))?;
            targets.push(parts);
        }
    }
    if targets.is_empty() {
        bail!("nothing to preload");
    }

    let cache = ctx.cache()?;
    let summary = cache
        .preload(
            targets
                .iter()
                .map(|parts| (parts.name.clone(), parts.variant.clone())),
        )
        .await;
    info!(
        resolved = summary.resolved,
        failed = summary.failed,
        "preload finished"
    );

    let assets: Vec<AssetStatus> = targets
        .iter()
        .map(|parts| AssetStatus {
            asset: parts.to_string(),
            cached: cache.peek(&parts.name, &parts.variant).is_some(),
        })
        .collect();

    let output = PreloadOutput { summary, assets };
    emit(ctx.output(), &output, || {
        let mut lines = vec![format!(
            "preloaded {} asset(s), {} failed",
            output.summary.resolved, output.summary.failed
        )];
        for status in &output.assets {
            let mark = if status.cached { "ok" } else { "missing" };
            lines.push(format!("  {mark:<8}{}", status.asset));
        }
        lines.join("\n")
    })
}
