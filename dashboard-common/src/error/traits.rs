//! Error classification.
//!
//! Nothing in the dashboard retries on its own. Classification decides how
//! loudly a failure is logged and whether the user is told to simply try
//! again.

use super::common::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// May succeed if the user tries again (RPC hiccup, timeout)
    Transient,
    /// Will fail the same way again (bad input, rejected transaction)
    Permanent,
    /// The deployment is misconfigured
    Configuration,
    /// Unexpected state, most likely a bug
    Internal,
}

pub trait ErrorClassification {
    fn category(&self) -> ErrorCategory;

    fn is_transient(&self) -> bool {
        self.category() == ErrorCategory::Transient
    }

    fn is_permanent(&self) -> bool {
        self.category() == ErrorCategory::Permanent
    }

    /// Level a failure of this kind is logged at. Transient failures are
    /// expected on a public RPC and stay at `warn`.
    fn log_level(&self) -> tracing::Level {
        match self.category() {
            ErrorCategory::Transient | ErrorCategory::Permanent => tracing::Level::WARN,
            ErrorCategory::Configuration | ErrorCategory::Internal => tracing::Level::ERROR,
        }
    }
}

/// Log `err` at the level its category calls for.
pub fn log_failure<E>(context: &str, err: &E)
where
    E: ErrorClassification + std::fmt::Display,
{
    if err.log_level() == tracing::Level::ERROR {
        tracing::error!(category = ?err.category(), "{}: {}", context, err);
    } else {
        tracing::warn!(category = ?err.category(), "{}: {}", context, err);
    }
}

impl ErrorClassification for NetworkError {
    fn category(&self) -> ErrorCategory {
        match self {
            NetworkError::Connection(_) | NetworkError::Timeout(_) | NetworkError::Request(_) => {
                ErrorCategory::Transient
            }
            NetworkError::InvalidResponse(_) => ErrorCategory::Permanent,
        }
    }
}

impl ErrorClassification for ConfigurationError {
    fn category(&self) -> ErrorCategory {
        ErrorCategory::Configuration
    }
}

impl ErrorClassification for ValidationError {
    fn category(&self) -> ErrorCategory {
        ErrorCategory::Permanent
    }
}
