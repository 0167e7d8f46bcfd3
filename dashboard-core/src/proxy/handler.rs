use std::time::Duration;

use reqwest::{header, Client};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;
use url::Url;

use super::errors::ProxyError;
use dashboard_common::config::RpcSettings;
use dashboard_common::display::format_pub_key;
use dashboard_common::error::{log_failure, NetworkError};
use dashboard_common::network::resolve_rpc_url;

/// Query string of `GET /api/fetchManifest`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ManifestQuery {
    pub network: Option<String>,
    #[serde(rename = "publicKey")]
    pub public_key: Option<String>,
}

impl ManifestQuery {
    pub fn from_query_string(query: Option<&str>) -> Self {
        let mut parsed = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.unwrap_or("").as_bytes()) {
            match key.as_ref() {
                "network" => parsed.network = Some(value.into_owned()),
                "publicKey" => parsed.public_key = Some(value.into_owned()),
                _ => {}
            }
        }
        parsed
    }
}

/// Status code and JSON body sent back to the browser.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyReply {
    pub status: u16,
    pub body: Value,
}

impl ProxyReply {
    pub fn from_result(result: Result<Value, ProxyError>) -> Self {
        match result {
            Ok(data) => Self {
                status: 200,
                body: json!({ "data": data }),
            },
            Err(e) => Self {
                status: 500,
                body: json!({ "error": e.to_string() }),
            },
        }
    }
}

/// Stateless passthrough to the network's RPC provider. One upstream call
/// per request: no retry, no caching.
pub struct ManifestProxy {
    client: Client,
    rpc: RpcSettings,
    timeout: Duration,
}

impl ManifestProxy {
    pub fn new(rpc: RpcSettings, timeout: Duration) -> Result<Self, ProxyError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| ProxyError::Client(e.to_string()))?;

        Ok(Self {
            client,
            rpc,
            timeout,
        })
    }

    /// Upstream URL for a query: the network's RPC URL with `publicKey`
    /// appended to whatever query it already carries.
    pub fn upstream_url(&self, query: &ManifestQuery) -> Result<Url, ProxyError> {
        let public_key = query
            .public_key
            .as_deref()
            .ok_or(ProxyError::MissingParameter("publicKey"))?;

        let base = resolve_rpc_url(query.network.as_deref(), &self.rpc);
        let mut url = Url::parse(&base).map_err(|e| ProxyError::InvalidUrl {
            url: base.clone(),
            reason: e.to_string(),
        })?;
        url.query_pairs_mut().append_pair("publicKey", public_key);
        Ok(url)
    }

    /// Fetch the upstream JSON for a query. The upstream body is returned
    /// whatever its status code, as long as it parses as JSON.
    pub async fn fetch(&self, query: &ManifestQuery) -> Result<Value, ProxyError> {
        let url = self.upstream_url(query)?;
        debug!(
            network = query.network.as_deref().unwrap_or("default"),
            "Fetching manifest for {}",
            query.public_key.as_deref().map(format_pub_key).unwrap_or_default()
        );

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.network_error(e))?;

        let status = response.status();
        if !status.is_success() {
            debug!("Upstream answered {}", status);
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ProxyError::Network(NetworkError::InvalidResponse(e.to_string())))
    }

    /// Handle one request end to end.
    pub async fn handle(&self, query: &ManifestQuery) -> ProxyReply {
        let result = self.fetch(query).await;
        if let Err(e) = &result {
            log_failure("Manifest proxy request failed", e);
        }
        ProxyReply::from_result(result)
    }

    fn network_error(&self, e: reqwest::Error) -> ProxyError {
        let err = if e.is_timeout() {
            NetworkError::Timeout(self.timeout)
        } else if e.is_connect() {
            NetworkError::Connection(e.to_string())
        } else {
            NetworkError::Request(e.to_string())
        };
        err.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proxy() -> ManifestProxy {
        ManifestProxy::new(
            RpcSettings {
                devnet_url: Some("https://devnet.rpc.example/?api-key=abc".to_string()),
                mainnet_url: Some("https://mainnet.rpc.example".to_string()),
            },
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn query(network: Option<&str>, key: Option<&str>) -> ManifestQuery {
        ManifestQuery {
            network: network.map(str::to_string),
            public_key: key.map(str::to_string),
        }
    }

    #[test]
    fn test_query_string_parsing() {
        let q = ManifestQuery::from_query_string(Some("network=mainnet-beta&publicKey=Abc123&x=1"));
        assert_eq!(q, query(Some("mainnet-beta"), Some("Abc123")));
        assert_eq!(ManifestQuery::from_query_string(None), ManifestQuery::default());
    }

    #[test]
    fn test_upstream_url_keeps_provider_query() {
        let url = proxy()
            .upstream_url(&query(Some("devnet"), Some("Key1")))
            .unwrap();
        assert_eq!(url.as_str(), "https://devnet.rpc.example/?api-key=abc&publicKey=Key1");

        let url = proxy()
            .upstream_url(&query(Some("mainnet-beta"), Some("Key2")))
            .unwrap();
        assert_eq!(url.as_str(), "https://mainnet.rpc.example/?publicKey=Key2");
    }

    #[test]
    fn test_unknown_network_uses_public_cluster() {
        let url = proxy()
            .upstream_url(&query(Some("testnet"), Some("K")))
            .unwrap();
        assert_eq!(url.host_str(), Some("api.testnet.solana.com"));

        let url = proxy().upstream_url(&query(Some("bogus"), Some("K"))).unwrap();
        assert_eq!(url.host_str(), Some("api.devnet.solana.com"));
    }

    #[test]
    fn test_missing_public_key() {
        let err = proxy().upstream_url(&query(Some("devnet"), None)).unwrap_err();
        assert!(matches!(err, ProxyError::MissingParameter("publicKey")));

        let reply = ProxyReply::from_result(Err(err));
        assert_eq!(reply.status, 500);
        assert_eq!(reply.body["error"], "Missing query parameter: publicKey");
    }

    #[test]
    fn test_success_reply_wraps_data() {
        let reply = ProxyReply::from_result(Ok(json!({ "mpg": [1, 2] })));
        assert_eq!(reply.status, 200);
        assert_eq!(reply.body, json!({ "data": { "mpg": [1, 2] } }));
    }
}
