//! Error types reused by the session, order and proxy layers.
//!
//! Layer-specific errors wrap these with `#[from]`.

use std::time::Duration;
use thiserror::Error;

/// Failures talking to an RPC node or to the manifest upstream.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum NetworkError {
    #[error("Cannot reach RPC endpoint: {0}")]
    Connection(String),

    #[error("No answer within {0:?}")]
    Timeout(Duration),

    #[error("RPC request failed: {0}")]
    Request(String),

    /// Answered, but not with anything we can decode
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Problems with the process configuration, reported at startup.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConfigurationError {
    #[error("Setting '{0}' is not set")]
    MissingField(String),

    #[error("Setting '{field}' is invalid: {reason}")]
    InvalidValue { field: String, reason: String },

    /// A source could not be read or deserialized
    #[error("Could not read configuration: {0}")]
    Parse(String),
}

impl ConfigurationError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigurationError::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<config::ConfigError> for ConfigurationError {
    fn from(err: config::ConfigError) -> Self {
        match err {
            config::ConfigError::NotFound(key) => ConfigurationError::MissingField(key),
            other => ConfigurationError::Parse(other.to_string()),
        }
    }
}

/// A form field the user filled in wrongly (or not at all).
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: String },

    #[error("{field} {value} is below the minimum of {min}")]
    BelowMinimum {
        field: &'static str,
        value: String,
        min: String,
    },

    /// Parses, but cannot be encoded for the SDK
    #[error("{field} is invalid: {reason}")]
    InvalidFormat { field: &'static str, reason: String },
}

impl ValidationError {
    pub fn required(field: &'static str) -> Self {
        Self::Required { field }
    }

    pub fn not_positive(field: &'static str, value: impl ToString) -> Self {
        Self::NotPositive {
            field,
            value: value.to_string(),
        }
    }

    pub fn below_minimum(field: &'static str, value: impl ToString, min: impl ToString) -> Self {
        Self::BelowMinimum {
            field,
            value: value.to_string(),
            min: min.to_string(),
        }
    }

    pub fn invalid_format(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            field,
            reason: reason.into(),
        }
    }
}
