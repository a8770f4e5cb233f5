pub mod config;
pub mod context;
pub mod fetch;
pub mod output;
pub mod preload;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;

pub use config::{cmd_config, ConfigArgs};
pub use context::CliContext;
pub use fetch::{cmd_fetch, FetchArgs};
pub use output::OutputFormat;
pub use preload::{cmd_preload, PreloadArgs};

/// Fetch and preload icon assets through the coalescing cache
#[derive(Parser, Debug)]
#[command(name = "iconcache", author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "warn")]
    pub log_level: String,

    /// Enable debug mode
    #[arg(short, long)]
    pub debug: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    pub output: OutputFormat,

    /// Serve assets from this http route (overrides configuration)
    #[arg(long, value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Serve assets from this directory (overrides configuration)
    #[arg(long, value_name = "DIR", global = true)]
    pub asset_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch one asset and print its body
    Fetch(FetchArgs),

    /// Warm the cache with several assets; individual failures are reported, not fatal
    Preload(PreloadArgs),

    /// Inspect the effective configuration
    Config(ConfigArgs),
}

pub fn init_logging(level: &str, debug: bool) -> Result<()> {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        level.parse().context("Invalid log level")?
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.to_string())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(())
}

pub async fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_overrides(cli.base_url, cli.asset_dir);
    let ctx = CliContext::new(config, cli.output);

    match cli.command {
        Commands::Fetch(args) => cmd_fetch(args, &ctx).await,
        Commands::Preload(args) => cmd_preload(args, &ctx).await,
        Commands::Config(args) => cmd_config(args, &ctx),
    }
}
