//! Serve command - run the manifest proxy

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use crate::proxy::ManifestProxy;
use crate::server;
use dashboard_common::config::Settings;

/// Arguments for the serve command
#[derive(Args)]
pub struct ServeArgs {
    /// Bind host, overrides `server.host`
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port, overrides `server.port`
    #[arg(long, short)]
    pub port: Option<u16>,
}

/// Execute the serve command
pub async fn execute(args: ServeArgs) -> Result<()> {
    let settings = Settings::new().context("loading configuration")?;

    let host = args.host.unwrap_or_else(|| settings.server.host.clone());
    let port = args.port.unwrap_or(settings.server.port);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", host, port))?;

    info!("Starting manifest proxy");
    info!("  Cluster: {}", settings.network.cluster);
    info!("  Upstream timeout: {:?}", settings.server.upstream_timeout());

    let proxy = Arc::new(ManifestProxy::new(
        settings.rpc.clone(),
        settings.server.upstream_timeout(),
    )?);

    let (_, server) = server::bind(proxy, addr, async {
        // a failing signal handler just means we run until killed
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, shutting down");
        }
    })?;

    server.await?;
    info!("Manifest proxy stopped");
    Ok(())
}
