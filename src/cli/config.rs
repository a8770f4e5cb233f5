use anyhow::Result;
use clap::{Args, Subcommand};

use super::context::CliContext;
use super::output::{emit, OutputFormat};
use crate::config::default_config_path;

#[derive(Args, Clone, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Clone, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,

    /// Print the default configuration file location
    Path,
}

pub fn cmd_config(args: ConfigArgs, ctx: &CliContext) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            let format = match ctx.output() {
                OutputFormat::Human => OutputFormat::Yaml,
                other => other,
            };
            emit(format, ctx.config(), String::new)
        }
        ConfigAction::Path => {
            match default_config_path() {
                Some(path) => println!("{}", path.display()),
                None => println!("no configuration directory on this platform"),
            }
            Ok(())
        }
    }
}
