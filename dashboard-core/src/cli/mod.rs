//! Command-line interface

pub mod serve;
pub mod show_config;

use clap::{Parser, Subcommand};

/// Dexterity dashboard backend
#[derive(Parser)]
#[command(name = "dashboard-core")]
#[command(about = "Manifest proxy and tooling for the Dexterity trading dashboard")]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the manifest proxy server
    Serve(serve::ServeArgs),
    /// Print the resolved configuration
    Config(show_config::ConfigArgs),
}
