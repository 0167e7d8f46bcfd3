//! Order forms and their validation.
//!
//! Inputs are `Option` because a form field can be empty. A form only turns
//! into an [`OrderRequest`] once every field is present and sensible for the
//! product being traded.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ReferrerSettings;
use crate::error::ValidationError;
use crate::trader::{FixedPoint, OrderKind, OrderRequest, ProductRef};

/// Market order prices are sent in whole quote units.
const MARKET_PRICE_DECIMALS: u32 = 0;

/// Which way an order goes. `None` until the user picks a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderDirection {
    Long,
    Short,
    #[default]
    None,
}

impl OrderDirection {
    /// Checking "Long" selects it; checking it again clears the selection.
    pub fn toggle_long(self) -> Self {
        match self {
            OrderDirection::Long => OrderDirection::None,
            _ => OrderDirection::Long,
        }
    }

    pub fn toggle_short(self) -> Self {
        match self {
            OrderDirection::Short => OrderDirection::None,
            _ => OrderDirection::Short,
        }
    }

    /// `Some(true)` for a bid, `None` when no side is chosen.
    pub fn is_bid(self) -> Option<bool> {
        match self {
            OrderDirection::Long => Some(true),
            OrderDirection::Short => Some(false),
            OrderDirection::None => None,
        }
    }
}

fn positive(field: &'static str, value: Option<Decimal>) -> Result<Decimal, ValidationError> {
    let value = value.ok_or_else(|| ValidationError::required(field))?;
    if value <= Decimal::ZERO {
        return Err(ValidationError::not_positive(field, value));
    }
    Ok(value)
}

fn side(direction: OrderDirection) -> Result<bool, ValidationError> {
    direction
        .is_bid()
        .ok_or_else(|| ValidationError::required("direction"))
}

/// Encode a size in the product's decimals, rejecting anything that
/// truncates below the minimum tradable size.
fn encode_size(size: Decimal, product: &ProductRef) -> Result<FixedPoint, ValidationError> {
    if size < product.min_size {
        return Err(ValidationError::below_minimum("size", size, product.min_size));
    }
    FixedPoint::from_decimal(size, product.size_decimals)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitOrderForm {
    pub price: Option<Decimal>,
    pub size: Option<Decimal>,
    pub direction: OrderDirection,
}

impl LimitOrderForm {
    pub fn is_valid(&self) -> bool {
        self.price.is_some_and(|p| p > Decimal::ZERO)
            && self.size.is_some_and(|s| s > Decimal::ZERO)
            && self.direction != OrderDirection::None
    }

    pub fn to_request(
        &self,
        product: &ProductRef,
        referrer: &ReferrerSettings,
    ) -> Result<OrderRequest, ValidationError> {
        let price = positive("price", self.price)?;
        let size = positive("size", self.size)?;
        let is_bid = side(self.direction)?;

        Ok(OrderRequest {
            kind: OrderKind::Limit,
            product_index: product.index,
            is_bid,
            price: FixedPoint::exact(price)?,
            size: encode_size(size, product)?,
            referrer_trg: referrer.trg.clone(),
            referrer_fee_bps: referrer.fee_bps,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketOrderForm {
    /// Worst acceptable price move, percent of mark
    pub slippage_pct: Option<Decimal>,
    pub size: Option<Decimal>,
    pub direction: OrderDirection,
}

impl MarketOrderForm {
    pub fn is_valid(&self, mark: Option<Decimal>) -> bool {
        mark.is_some()
            && self.slippage_pct.is_some_and(|s| s >= Decimal::ZERO)
            && self.size.is_some_and(|s| s > Decimal::ZERO)
            && self.direction != OrderDirection::None
    }

    /// Limit price for the market order: the mark moved against us by the
    /// slippage percentage.
    pub fn limit_price(&self, mark: Decimal) -> Result<Decimal, ValidationError> {
        let slippage = self
            .slippage_pct
            .ok_or_else(|| ValidationError::required("slippage"))?;
        if slippage < Decimal::ZERO {
            return Err(ValidationError::invalid_format(
                "slippage",
                "must not be negative",
            ));
        }
        let offset = mark * slippage / Decimal::ONE_HUNDRED;
        match self.direction {
            OrderDirection::Short => Ok(mark - offset),
            _ => Ok(mark + offset),
        }
    }

    pub fn to_request(
        &self,
        product: &ProductRef,
        mark: Option<Decimal>,
        referrer: &ReferrerSettings,
    ) -> Result<OrderRequest, ValidationError> {
        let mark = mark.ok_or_else(|| ValidationError::required("mark price"))?;
        let size = positive("size", self.size)?;
        let is_bid = side(self.direction)?;
        let price = self.limit_price(mark)?;
        // whole quote units: a mark below 1 truncates to nothing
        let encoded = FixedPoint::from_decimal(price, MARKET_PRICE_DECIMALS)?;
        if encoded.is_zero() || encoded.is_negative() {
            return Err(ValidationError::not_positive("price", price));
        }

        Ok(OrderRequest {
            kind: OrderKind::Market,
            product_index: product.index,
            is_bid,
            price: encoded,
            size: encode_size(size, product)?,
            referrer_trg: referrer.trg.clone(),
            referrer_fee_bps: referrer.fee_bps,
        })
    }
}

/// Amount to deposit or withdraw, in whole quote units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingForm {
    pub amount: Option<Decimal>,
}

impl FundingForm {
    pub fn new(amount: Decimal) -> Self {
        Self {
            amount: Some(amount),
        }
    }

    pub fn to_amount(&self) -> Result<FixedPoint, ValidationError> {
        let amount = positive("amount", self.amount)?;
        FixedPoint::exact(amount)
    }
}
