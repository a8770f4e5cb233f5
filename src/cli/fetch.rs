use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use super::context::CliContext;
use super::output::emit;

#[derive(Args, Clone, Debug)]
pub struct FetchArgs {
    /// Icon set, e.g. `outline`
    pub variant: String,

    /// Icon within the set, e.g. `home`
    pub name: String,
}

#[derive(Serialize)]
struct FetchOutput<'a> {
    variant: &'a str,
    name: &'a str,
    bytes: usize,
    body: &'a str,
}

pub async fn cmd_fetch(args: FetchArgs, ctx: &CliContext) -> Result<()> {
    let cache = ctx.cache()?;
    let body = cache
        .fetch(&args.name, &args.variant)
        .await
        .with_context(|| format!("Failed to fetch {}/{}", args.variant, args.name))?;

    let output = FetchOutput {
        variant: &args.variant,
        name: &args.name,
        bytes: body.len(),
        body: &body,
    };
    emit(ctx.output(), &output, || body.to_string())
}
