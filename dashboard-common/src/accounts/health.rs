//! Account health classification.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Risk tier of a margin account, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AccountHealth {
    /// Portfolio value at or below maintenance margin
    Liquidatable,
    /// Above maintenance margin, at most 1.5x of it
    VeryUnhealthy,
    /// Above 1.5x maintenance margin, at or below initial margin
    UnhealthyAtRisk,
    /// Above initial margin, at most 1.5x of it
    HealthyAtRisk,
    /// Above 1.5x initial margin, at most 2x of it
    Healthy,
    /// Above 2x initial margin
    VeryHealthy,
}

impl AccountHealth {
    /// Text shown next to "Account Health"
    pub fn label(&self) -> &'static str {
        match self {
            AccountHealth::VeryHealthy => "Very Healthy",
            AccountHealth::Healthy => "Healthy",
            AccountHealth::HealthyAtRisk => "Healthy, at risk",
            AccountHealth::UnhealthyAtRisk => "Unhealthy, at risk",
            AccountHealth::VeryUnhealthy => "Very unhealthy, reduce your risk",
            AccountHealth::Liquidatable => "Liquidatable",
        }
    }

    /// True once the account no longer covers its initial margin
    pub fn is_at_risk(&self) -> bool {
        *self <= AccountHealth::UnhealthyAtRisk
    }
}

impl fmt::Display for AccountHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify portfolio value `value` against the initial (`initial`) and
/// maintenance (`maintenance`) margin requirements.
///
/// Thresholds are strict, so a value sitting exactly on a boundary lands in
/// the lower tier.
pub fn classify_health(value: Decimal, initial: Decimal, maintenance: Decimal) -> AccountHealth {
    let one_and_half = Decimal::new(15, 1);

    if value > initial * Decimal::TWO {
        AccountHealth::VeryHealthy
    } else if value > initial * one_and_half {
        AccountHealth::Healthy
    } else if value > initial {
        AccountHealth::HealthyAtRisk
    } else if value > maintenance * one_and_half {
        AccountHealth::UnhealthyAtRisk
    } else if value > maintenance {
        AccountHealth::VeryUnhealthy
    } else {
        AccountHealth::Liquidatable
    }
}
