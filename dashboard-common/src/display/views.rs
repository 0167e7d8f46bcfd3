//! Serializable view models. Numbers are rendered as strings so the front
//! end never re-parses decimals.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::format::{format_money, format_pub_key, format_quantity};
use super::time::time_since_at;
use crate::accounts::AccountSnapshot;
use crate::trader::{OrderRecord, PriceQuote, ProductRef, RawPosition};

/// Shown in place of leverage when there is no margin requirement.
const NOT_AVAILABLE: &str = "n/a";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfoView {
    pub cash_balance: String,
    pub open_positions_value: String,
    pub portfolio_value: String,
    pub initial_margin_requirement: String,
    pub maintenance_margin_requirement: String,
    pub account_health: String,
    pub account_leverage: String,
    pub all_time_pnl: String,
    pub last_updated: String,
}

impl AccountInfoView {
    pub fn from_snapshot(snapshot: &AccountSnapshot, now: DateTime<Utc>) -> Self {
        Self {
            cash_balance: format_money(snapshot.cash_balance()),
            open_positions_value: format_money(snapshot.open_positions_value()),
            portfolio_value: format_money(snapshot.portfolio_value()),
            initial_margin_requirement: format_money(snapshot.initial_margin_requirement()),
            maintenance_margin_requirement: format_money(
                snapshot.maintenance_margin_requirement(),
            ),
            account_health: snapshot.health().to_string(),
            account_leverage: format_leverage(snapshot.leverage()),
            all_time_pnl: format_money(snapshot.all_time_pnl()),
            last_updated: time_since_at(snapshot.last_updated(), now),
        }
    }
}

fn format_leverage(leverage: Option<Decimal>) -> String {
    match leverage {
        Some(value) => format!("{}x", value.round_dp(2).normalize()),
        None => NOT_AVAILABLE.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPricesView {
    pub product: String,
    pub index_price: String,
    pub mark_price: String,
}

impl ProductPricesView {
    pub fn new(product: &ProductRef, quote: &PriceQuote) -> Self {
        Self {
            product: product.name.clone(),
            index_price: format_money(quote.index),
            mark_price: format_money(quote.mark),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRowView {
    pub id: String,
    pub product: String,
    pub price: String,
    pub quantity: String,
    pub side: String,
}

impl OrderRowView {
    pub fn from_record(order: &OrderRecord) -> Self {
        Self {
            id: order.id.clone(),
            product: order.product_name.clone(),
            price: order.price.to_string(),
            quantity: order.quantity.to_string(),
            side: order.side.to_string(),
        }
    }

    pub fn rows(orders: &[OrderRecord]) -> Vec<Self> {
        orders.iter().map(Self::from_record).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionDirection {
    Long,
    Short,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRowView {
    pub product: String,
    pub quantity: String,
    /// Quantity times the product's mark price, `None` until a mark is known
    pub value: Option<String>,
    pub direction: PositionDirection,
}

impl PositionRowView {
    /// Row for a position, or `None` for a flat one.
    pub fn from_position(position: &RawPosition, mark: Option<Decimal>) -> Option<Self> {
        if position.quantity.is_zero() {
            return None;
        }

        let direction = if position.quantity.is_negative() {
            PositionDirection::Short
        } else {
            PositionDirection::Long
        };

        // out of Decimal range: show the raw form, no value
        let (quantity, value) = match position.quantity.to_decimal() {
            Some(quantity) => (
                format_quantity(quantity),
                mark.and_then(|m| quantity.checked_mul(m)).map(format_money),
            ),
            None => (position.quantity.to_string(), None),
        };

        Some(Self {
            product: position.product_name.clone(),
            quantity,
            value,
            direction,
        })
    }

    /// Rows for every open position, valued at the mark prices in `marks`
    /// (keyed by product name).
    pub fn rows(positions: &[RawPosition], marks: &HashMap<String, Decimal>) -> Vec<Self> {
        positions
            .iter()
            .filter_map(|p| Self::from_position(p, marks.get(&p.product_name).copied()))
            .collect()
    }
}

/// Header summarizing what the session trades.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductHeaderView {
    pub mpg: Option<String>,
    pub product: String,
    pub min_trade_size: String,
}

impl ProductHeaderView {
    pub fn new(mpg: Option<&str>, product: &ProductRef) -> Self {
        Self {
            mpg: mpg.map(str::to_string),
            product: product.name.clone(),
            min_trade_size: format_quantity(product.min_size),
        }
    }

    pub fn line(&self) -> String {
        format!(
            "Mpg PubKey: {} | Product: {} | Min. Trade Size: {}",
            self.mpg.as_deref().map(format_pub_key).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            self.product,
            self.min_trade_size
        )
    }
}
