//! Solana cluster naming and RPC endpoint resolution.
//!
//! The dashboard only talks to two networks with dedicated RPC providers
//! (`devnet` and `mainnet-beta`). Anything else goes through the public
//! cluster URLs, the same way the wallet adapter resolves them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::RpcSettings;

/// Devnet market product group (BTC).
pub const DEVNET_DEFAULT_MPG: &str = "HyWxreWnng9ZBDPYpuYugAfpCMkRkJ1oz93oyoybDFLB";

/// Mainnet-beta market product group (majors).
pub const MAINNET_DEFAULT_MPG: &str = "4cKB5xKtDpv4xo6ZxyiEvtyX3HgXzyJUS1Y8hAfoNkMT";

/// A Solana cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Cluster {
    #[default]
    Devnet,
    Testnet,
    MainnetBeta,
}

impl Cluster {
    /// Cluster name as used in query strings and wallet adapters
    pub fn as_str(&self) -> &'static str {
        match self {
            Cluster::Devnet => "devnet",
            Cluster::Testnet => "testnet",
            Cluster::MainnetBeta => "mainnet-beta",
        }
    }

    /// Public RPC URL of this cluster
    pub fn public_rpc_url(&self) -> &'static str {
        match self {
            Cluster::Devnet => "https://api.devnet.solana.com",
            Cluster::Testnet => "https://api.testnet.solana.com",
            Cluster::MainnetBeta => "https://api.mainnet-beta.solana.com",
        }
    }

    /// Default market product group for this cluster, if the exchange runs one
    pub fn default_mpg(&self) -> Option<&'static str> {
        match self {
            Cluster::Devnet => Some(DEVNET_DEFAULT_MPG),
            Cluster::MainnetBeta => Some(MAINNET_DEFAULT_MPG),
            Cluster::Testnet => None,
        }
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cluster {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "devnet" => Ok(Cluster::Devnet),
            "testnet" => Ok(Cluster::Testnet),
            "mainnet-beta" => Ok(Cluster::MainnetBeta),
            other => Err(format!("unknown cluster: {}", other)),
        }
    }
}

/// Public RPC URL for an optional cluster; no cluster means devnet.
pub fn cluster_api_url(cluster: Option<Cluster>) -> &'static str {
    cluster.unwrap_or_default().public_rpc_url()
}

/// Resolve the RPC endpoint for a `network` query value.
///
/// `devnet` and `mainnet-beta` use the configured provider URLs when set.
/// Every other value, including a missing one, goes through generic cluster
/// resolution.
pub fn resolve_rpc_url(network: Option<&str>, rpc: &RpcSettings) -> String {
    match network {
        Some("devnet") => rpc
            .devnet_url
            .clone()
            .unwrap_or_else(|| Cluster::Devnet.public_rpc_url().to_string()),
        Some("mainnet-beta") => rpc
            .mainnet_url
            .clone()
            .unwrap_or_else(|| Cluster::MainnetBeta.public_rpc_url().to_string()),
        other => {
            let cluster = other.and_then(|name| name.parse::<Cluster>().ok());
            cluster_api_url(cluster).to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rpc() -> RpcSettings {
        RpcSettings {
            devnet_url: Some("https://devnet.example.org".to_string()),
            mainnet_url: Some("https://mainnet.example.org".to_string()),
        }
    }

    #[test]
    fn test_explicit_networks_use_configured_urls() {
        assert_eq!(resolve_rpc_url(Some("devnet"), &rpc()), "https://devnet.example.org");
        assert_eq!(
            resolve_rpc_url(Some("mainnet-beta"), &rpc()),
            "https://mainnet.example.org"
        );
    }

    #[test]
    fn test_unknown_network_falls_through_to_cluster_resolution() {
        let url = resolve_rpc_url(Some("localnet"), &rpc());
        assert_eq!(url, "https://api.devnet.solana.com");
        assert_ne!(url, "https://devnet.example.org");

        assert_eq!(
            resolve_rpc_url(Some("testnet"), &rpc()),
            "https://api.testnet.solana.com"
        );
        assert_eq!(resolve_rpc_url(None, &rpc()), "https://api.devnet.solana.com");
    }

    #[test]
    fn test_missing_provider_url_uses_public_endpoint() {
        let rpc = RpcSettings::default();
        assert_eq!(
            resolve_rpc_url(Some("mainnet-beta"), &rpc),
            "https://api.mainnet-beta.solana.com"
        );
    }

    #[test]
    fn test_default_mpg_per_cluster() {
        assert_eq!(Cluster::Devnet.default_mpg(), Some(DEVNET_DEFAULT_MPG));
        assert_eq!(Cluster::MainnetBeta.default_mpg(), Some(MAINNET_DEFAULT_MPG));
        assert_eq!(Cluster::Testnet.default_mpg(), None);
    }

    #[test]
    fn test_cluster_round_trips_through_name() {
        for cluster in [Cluster::Devnet, Cluster::Testnet, Cluster::MainnetBeta] {
            assert_eq!(cluster.as_str().parse::<Cluster>(), Ok(cluster));
        }
        assert!("mainnet".parse::<Cluster>().is_err());
    }
}
