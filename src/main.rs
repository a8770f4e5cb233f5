use anyhow::Result;
use clap::Parser;
use iconcache_cli::cli::{init_logging, run, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.debug)?;
    run(cli).await
}
