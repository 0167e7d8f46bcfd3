use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigurationError;
use crate::network::Cluster;

const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct NetworkSettings {
    #[serde(default)]
    pub cluster: Cluster,
    /// Market product group override; falls back to the cluster default
    #[serde(default)]
    pub mpg: Option<String>,
}

impl NetworkSettings {
    pub fn mpg(&self) -> Option<&str> {
        self.mpg.as_deref().or_else(|| self.cluster.default_mpg())
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct RpcSettings {
    #[serde(default)]
    pub devnet_url: Option<String>,
    #[serde(default)]
    pub mainnet_url: Option<String>,
}

/// Referrer attached to every order the dashboard places.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ReferrerSettings {
    /// Trader risk group public key (base58) receiving referral fees
    pub trg: String,
    #[serde(default)]
    pub fee_bps: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Upstream timeout for the manifest proxy, seconds
    #[serde(default = "default_upstream_timeout_secs")]
    pub upstream_timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            upstream_timeout_secs: default_upstream_timeout_secs(),
        }
    }
}

impl ServerSettings {
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RefreshSettings {
    /// Mark/index price polling period
    #[serde(default = "default_price_interval_ms")]
    pub price_interval_ms: u64,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            price_interval_ms: default_price_interval_ms(),
        }
    }
}

impl RefreshSettings {
    pub fn price_interval(&self) -> Duration {
        Duration::from_millis(self.price_interval_ms)
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    3000
}
fn default_upstream_timeout_secs() -> u64 {
    30
}
fn default_price_interval_ms() -> u64 {
    500
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default)]
    pub network: NetworkSettings,
    #[serde(default)]
    pub rpc: RpcSettings,
    pub referrer: ReferrerSettings,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub refresh: RefreshSettings,
}

impl Settings {
    /// Load settings from `config/<RUN_MODE>`, `DEXTERITY__*` variables and
    /// the well-known deployment variables, then validate them.
    pub fn new() -> Result<Self, ConfigurationError> {
        if dotenvy::dotenv().is_err() {
            debug!(".env file not found, using process environment only");
        }

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(Environment::with_prefix("DEXTERITY").separator("__"));

        for (var, key) in [
            ("DEVNET_RPC", "rpc.devnet_url"),
            ("MAINNET_RPC", "rpc.mainnet_url"),
            ("REFERRER_TRG", "referrer.trg"),
            ("REFERRER_BPS", "referrer.fee_bps"),
        ] {
            if let Ok(value) = std::env::var(var) {
                builder = builder.set_override(key, value)?;
            }
        }

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Build settings from a TOML string, used by tests and embedded setups.
    pub fn from_toml(source: &str) -> Result<Self, ConfigurationError> {
        let settings: Settings = Config::builder()
            .add_source(File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        validate_pubkey("referrer.trg", &self.referrer.trg)?;

        if self.referrer.fee_bps > 10_000 {
            return Err(ConfigurationError::invalid(
                "referrer.fee_bps",
                format!("must be at most 10000, got {}", self.referrer.fee_bps),
            ));
        }

        if let Some(mpg) = &self.network.mpg {
            validate_pubkey("network.mpg", mpg)?;
        }

        if self.refresh.price_interval_ms == 0 {
            return Err(ConfigurationError::invalid(
                "refresh.price_interval_ms",
                "must be greater than zero",
            ));
        }

        Ok(())
    }
}

fn validate_pubkey(field: &str, key: &str) -> Result<(), ConfigurationError> {
    if key.is_empty() {
        return Err(ConfigurationError::MissingField(field.to_string()));
    }
    if !(32..=44).contains(&key.len()) {
        return Err(ConfigurationError::invalid(
            field,
            format!("expected 32-44 base58 characters, got {}", key.len()),
        ));
    }
    if let Some(bad) = key.chars().find(|c| !BASE58_ALPHABET.contains(*c)) {
        return Err(ConfigurationError::invalid(
            field,
            format!("'{}' is not a base58 character", bad),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERRER: &str = "7ZTPCqfKdmXWtG6bMvAm5c2Bbg1n5gTFoqbwmz3yJkXa";

    #[test]
    fn test_minimal_settings_use_defaults() {
        let settings = Settings::from_toml(&format!("[referrer]\ntrg = \"{}\"\n", REFERRER))
            .expect("valid settings");

        assert_eq!(settings.network.cluster, Cluster::Devnet);
        assert_eq!(settings.network.mpg(), Some(crate::network::DEVNET_DEFAULT_MPG));
        assert_eq!(settings.referrer.fee_bps, 0);
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.refresh.price_interval(), Duration::from_millis(500));
        assert_eq!(settings.rpc, RpcSettings::default());
    }

    #[test]
    fn test_full_settings() {
        let source = format!(
            r#"
            [network]
            cluster = "mainnet-beta"

            [rpc]
            devnet_url = "https://devnet.example.org"
            mainnet_url = "https://mainnet.example.org"

            [referrer]
            trg = "{}"
            fee_bps = 25

            [server]
            port = 8080

            [refresh]
            price_interval_ms = 1000
            "#,
            REFERRER
        );
        let settings = Settings::from_toml(&source).expect("valid settings");

        assert_eq!(settings.network.cluster, Cluster::MainnetBeta);
        assert_eq!(settings.network.mpg(), Some(crate::network::MAINNET_DEFAULT_MPG));
        assert_eq!(settings.referrer.fee_bps, 25);
        assert_eq!(settings.server.port, 8080);
        assert_eq!(
            settings.rpc.mainnet_url.as_deref(),
            Some("https://mainnet.example.org")
        );
    }

    #[test]
    fn test_fee_bps_out_of_range_is_rejected() {
        let source = format!("[referrer]\ntrg = \"{}\"\nfee_bps = 10001\n", REFERRER);
        let err = Settings::from_toml(&source).unwrap_err();
        assert!(err.to_string().contains("referrer.fee_bps"));
    }

    #[test]
    fn test_invalid_referrer_key_is_rejected() {
        let err = Settings::from_toml("[referrer]\ntrg = \"not-a-key\"\n").unwrap_err();
        assert!(err.to_string().contains("referrer.trg"));

        // '0' is outside the base58 alphabet
        let key = format!("0{}", &REFERRER[1..]);
        let err = Settings::from_toml(&format!("[referrer]\ntrg = \"{}\"\n", key)).unwrap_err();
        assert!(err.to_string().contains("base58"));
    }

    #[test]
    fn test_missing_referrer_section_fails() {
        assert!(Settings::from_toml("[server]\nport = 1\n").is_err());
    }
}
