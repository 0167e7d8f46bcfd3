//! Dashboard backend CLI
//!
//! Provides commands for:
//! - `serve`: Run the manifest proxy
//! - `config`: Print the resolved configuration

use anyhow::{anyhow, Result};
use clap::Parser;

use dashboard_common::logging::{init_logging, LogConfig};
use dashboard_core::cli::{self, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging(LogConfig::from_env().with_default_level("info")).map_err(|e| anyhow!(e))?;

    match Cli::parse().command {
        Commands::Serve(args) => cli::serve::execute(args).await?,
        Commands::Config(args) => cli::show_config::execute(args)?,
    }

    Ok(())
}
