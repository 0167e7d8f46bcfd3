//! Account snapshots.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::health::{classify_health, AccountHealth};
use crate::trader::{OrderRecord, RawPosition};

/// Raw account figures read from the trader handle in one refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccountFigures {
    pub cash_balance: Decimal,
    pub open_positions_value: Decimal,
    pub portfolio_value: Decimal,
    pub initial_margin_requirement: Decimal,
    pub maintenance_margin_requirement: Decimal,
    pub all_time_pnl: Decimal,
}

impl AccountFigures {
    /// Portfolio value over initial margin requirement; `None` when there
    /// is no requirement to divide by.
    pub fn leverage(&self) -> Option<Decimal> {
        if self.initial_margin_requirement.is_zero() {
            return None;
        }
        self.portfolio_value
            .checked_div(self.initial_margin_requirement)
    }

    pub fn health(&self) -> AccountHealth {
        classify_health(
            self.portfolio_value,
            self.initial_margin_requirement,
            self.maintenance_margin_requirement,
        )
    }
}

/// A consistent capture of one margin account.
///
/// Health and leverage are derived when the snapshot is built and cannot be
/// set on their own, so they always describe this snapshot's figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountSnapshot {
    figures: AccountFigures,
    account_health: AccountHealth,
    account_leverage: Option<Decimal>,
    orders: Vec<OrderRecord>,
    positions: Vec<RawPosition>,
    last_updated: DateTime<Utc>,
}

impl AccountSnapshot {
    pub fn capture(
        figures: AccountFigures,
        orders: Vec<OrderRecord>,
        positions: Vec<RawPosition>,
        captured_at: DateTime<Utc>,
    ) -> Self {
        Self {
            account_health: figures.health(),
            account_leverage: figures.leverage(),
            figures,
            orders,
            positions,
            last_updated: captured_at,
        }
    }

    pub fn figures(&self) -> &AccountFigures {
        &self.figures
    }

    pub fn cash_balance(&self) -> Decimal {
        self.figures.cash_balance
    }

    pub fn open_positions_value(&self) -> Decimal {
        self.figures.open_positions_value
    }

    pub fn portfolio_value(&self) -> Decimal {
        self.figures.portfolio_value
    }

    pub fn initial_margin_requirement(&self) -> Decimal {
        self.figures.initial_margin_requirement
    }

    pub fn maintenance_margin_requirement(&self) -> Decimal {
        self.figures.maintenance_margin_requirement
    }

    pub fn all_time_pnl(&self) -> Decimal {
        self.figures.all_time_pnl
    }

    pub fn health(&self) -> AccountHealth {
        self.account_health
    }

    pub fn leverage(&self) -> Option<Decimal> {
        self.account_leverage
    }

    pub fn orders(&self) -> &[OrderRecord] {
        &self.orders
    }

    pub fn positions(&self) -> &[RawPosition] {
        &self.positions
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn figures(v: Decimal, i: Decimal, m: Decimal) -> AccountFigures {
        AccountFigures {
            portfolio_value: v,
            initial_margin_requirement: i,
            maintenance_margin_requirement: m,
            ..Default::default()
        }
    }

    #[test]
    fn test_capture_derives_health_and_leverage() {
        let snapshot = AccountSnapshot::capture(
            figures(dec!(150), dec!(100), dec!(50)),
            Vec::new(),
            Vec::new(),
            Utc::now(),
        );

        assert_eq!(snapshot.health(), AccountHealth::HealthyAtRisk);
        assert_eq!(snapshot.leverage(), Some(dec!(1.5)));
        assert_eq!(snapshot.portfolio_value(), dec!(150));
    }

    #[test]
    fn test_leverage_is_none_without_initial_margin() {
        let snapshot = AccountSnapshot::capture(
            figures(dec!(1000), Decimal::ZERO, Decimal::ZERO),
            Vec::new(),
            Vec::new(),
            Utc::now(),
        );

        assert_eq!(snapshot.leverage(), None);
        assert_eq!(snapshot.health(), AccountHealth::VeryHealthy);
    }

    #[test]
    fn test_health_follows_figures_not_history() {
        let healthy = AccountSnapshot::capture(
            figures(dec!(500), dec!(100), dec!(50)),
            Vec::new(),
            Vec::new(),
            Utc::now(),
        );
        let next = AccountSnapshot::capture(
            figures(dec!(40), dec!(100), dec!(50)),
            Vec::new(),
            Vec::new(),
            Utc::now(),
        );

        assert_eq!(healthy.health(), AccountHealth::VeryHealthy);
        assert_eq!(next.health(), AccountHealth::Liquidatable);
    }
}
