use thiserror::Error;

use dashboard_common::error::{ErrorCategory, ErrorClassification, NetworkError};

#[derive(Error, Debug)]
pub enum ProxyError {
    /// A required query parameter is absent
    #[error("Missing query parameter: {0}")]
    MissingParameter(&'static str),

    /// The resolved RPC URL could not be parsed
    #[error("Invalid RPC URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error(transparent)]
    Network(#[from] NetworkError),

    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Client(String),
}

impl ErrorClassification for ProxyError {
    fn category(&self) -> ErrorCategory {
        match self {
            ProxyError::MissingParameter(_) => ErrorCategory::Permanent,
            ProxyError::InvalidUrl { .. } => ErrorCategory::Configuration,
            ProxyError::Network(e) => e.category(),
            ProxyError::Client(_) => ErrorCategory::Internal,
        }
    }
}
