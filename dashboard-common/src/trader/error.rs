use thiserror::Error;

use crate::error::{ErrorCategory, ErrorClassification, NetworkError};

/// Result type for trader handle operations.
pub type TraderResult<T> = Result<T, TraderError>;

/// Failures reported by the trading SDK or the layers beneath it.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum TraderError {
    /// RPC or transport failure
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// The wallet refused or failed to sign
    #[error("Signing failed: {0}")]
    Signing(String),

    /// The transaction landed but the program rejected it
    #[error("Transaction rejected: {0}")]
    Rejected(String),

    /// Product is unknown to the market product group
    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    /// Handle is not connected / account not loaded
    #[error("Trader not connected")]
    NotConnected,

    /// Anything else the SDK reports
    #[error("SDK error: {0}")]
    Sdk(String),
}

impl ErrorClassification for TraderError {
    fn category(&self) -> ErrorCategory {
        match self {
            TraderError::Network(e) => e.category(),
            TraderError::Signing(_) => ErrorCategory::Permanent,
            TraderError::Rejected(_) => ErrorCategory::Permanent,
            TraderError::UnknownProduct(_) => ErrorCategory::Permanent,
            TraderError::NotConnected => ErrorCategory::Transient,
            TraderError::Sdk(_) => ErrorCategory::Internal,
        }
    }
}
