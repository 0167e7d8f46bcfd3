//! Config command - print what the dashboard would run with

use anyhow::{Context, Result};
use clap::Args;

use dashboard_common::config::Settings;
use dashboard_common::display::format_pub_key;
use dashboard_common::network::resolve_rpc_url;

#[derive(Args)]
pub struct ConfigArgs {
    /// Print full keys instead of the shortened form
    #[arg(long)]
    pub full_keys: bool,
}

pub fn execute(args: ConfigArgs) -> Result<()> {
    let settings = Settings::new().context("loading configuration")?;
    for line in render(&settings, args.full_keys) {
        println!("{}", line);
    }
    Ok(())
}

/// Human-readable summary of the settings.
pub fn render(settings: &Settings, full_keys: bool) -> Vec<String> {
    let key = |k: &str| {
        if full_keys {
            k.to_string()
        } else {
            format_pub_key(k)
        }
    };
    let cluster = settings.network.cluster;

    vec![
        format!("Cluster:            {}", cluster),
        format!(
            "Market group:       {}",
            settings.network.mpg().map(&key).unwrap_or_else(|| "none".to_string())
        ),
        format!(
            "Devnet RPC:         {}",
            resolve_rpc_url(Some("devnet"), &settings.rpc)
        ),
        format!(
            "Mainnet-beta RPC:   {}",
            resolve_rpc_url(Some("mainnet-beta"), &settings.rpc)
        ),
        format!(
            "Referrer:           {} ({} bps)",
            key(&settings.referrer.trg),
            settings.referrer.fee_bps
        ),
        format!(
            "Proxy:              {}:{}",
            settings.server.host, settings.server.port
        ),
        format!(
            "Price refresh:      {} ms",
            settings.refresh.price_interval_ms
        ),
    ]
}
