//! Value types exchanged with the trader handle.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// Largest scale `rust_decimal` can represent.
const MAX_SCALE: u32 = 28;

/// Fixed-point quantity as the SDK ships it: `mantissa × 10^exponent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FixedPoint {
    pub mantissa: i64,
    pub exponent: i32,
}

impl FixedPoint {
    pub fn new(mantissa: i64, exponent: i32) -> Self {
        Self { mantissa, exponent }
    }

    /// Encode `value` with `decimals` fractional digits, truncating toward zero.
    ///
    /// `from_decimal(0.12345, 4)` is `1234 × 10^-4`.
    pub fn from_decimal(value: Decimal, decimals: u32) -> Result<Self, ValidationError> {
        if decimals > MAX_SCALE {
            return Err(ValidationError::invalid_format(
                "decimals",
                format!("at most {} decimals are supported", MAX_SCALE),
            ));
        }
        let scaled = value
            .round_dp_with_strategy(decimals, RoundingStrategy::ToZero)
            .checked_mul(Decimal::from_i128_with_scale(10_i128.pow(decimals), 0))
            .ok_or_else(|| ValidationError::invalid_format("value", "too large to encode"))?;
        let mantissa = scaled
            .trunc()
            .to_i64()
            .ok_or_else(|| ValidationError::invalid_format("value", "does not fit in 64 bits"))?;
        Ok(Self::new(mantissa, -(decimals as i32)))
    }

    /// Encode `value` exactly, keeping its own scale.
    pub fn exact(value: Decimal) -> Result<Self, ValidationError> {
        let normalized = value.normalize();
        let mantissa = i64::try_from(normalized.mantissa())
            .map_err(|_| ValidationError::invalid_format("value", "does not fit in 64 bits"))?;
        Ok(Self::new(mantissa, -(normalized.scale() as i32)))
    }

    /// Scaled value. Exponents outside what `Decimal` can hold saturate to
    /// zero (tiny) or `None` (overflow).
    pub fn to_decimal(&self) -> Option<Decimal> {
        if self.exponent <= 0 {
            let scale = self.exponent.unsigned_abs();
            if scale > MAX_SCALE {
                // shift the excess digits off the mantissa first
                let excess = scale - MAX_SCALE;
                let m = match 10_i128.checked_pow(excess) {
                    Some(divisor) => self.mantissa as i128 / divisor,
                    // larger than any i64 mantissa
                    None => 0,
                };
                return Some(Decimal::from_i128_with_scale(m, MAX_SCALE));
            }
            Some(Decimal::from_i128_with_scale(self.mantissa as i128, scale))
        } else {
            let factor = 10_i128.checked_pow(self.exponent as u32)?;
            let value = (self.mantissa as i128).checked_mul(factor)?;
            Decimal::try_from_i128_with_scale(value, 0).ok()
        }
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa == 0
    }

    pub fn is_negative(&self) -> bool {
        self.mantissa < 0
    }
}

impl fmt::Display for FixedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_decimal() {
            Some(value) => write!(f, "{}", value.normalize()),
            None => write!(f, "{}e{}", self.mantissa, self.exponent),
        }
    }
}

/// Side of a resting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Bid,
    Ask,
}

impl Side {
    pub fn is_bid(&self) -> bool {
        matches!(self, Side::Bid)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Bid => write!(f, "Bid"),
            Side::Ask => write!(f, "Ask"),
        }
    }
}

/// The product an order form or price board is pointed at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRef {
    /// Index within the market product group
    pub index: usize,
    pub name: String,
    /// Smallest tradable size, `10^-size_decimals`
    pub min_size: Decimal,
    /// Decimal places used to encode order sizes
    pub size_decimals: u32,
}

impl ProductRef {
    pub fn new(index: usize, name: impl Into<String>, size_decimals: u32) -> Self {
        Self {
            index,
            name: name.into(),
            min_size: Decimal::new(1, size_decimals.min(MAX_SCALE)),
            size_decimals,
        }
    }

    /// BTC perpetual, the product every session starts on.
    pub fn btc_perp() -> Self {
        Self::new(0, "BTCUSD-PERP", 4)
    }
}

impl Default for ProductRef {
    fn default() -> Self {
        Self::btc_perp()
    }
}

/// Product metadata as listed by the SDK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInfo {
    pub index: usize,
    pub name: String,
    /// Base-asset decimals of an outright product
    pub base_decimals: u32,
    /// True for outright products, false for combos
    pub outright: bool,
    /// True when the product slot has no product key yet
    pub uninitialized: bool,
}

impl ProductInfo {
    /// Only initialized outright products can be quoted and traded.
    pub fn is_tradable(&self) -> bool {
        self.outright && !self.uninitialized
    }

    pub fn to_ref(&self) -> ProductRef {
        ProductRef::new(self.index, self.name.clone(), self.base_decimals)
    }
}

/// A resting order, read-only projection of SDK state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: String,
    pub product_name: String,
    pub product_index: usize,
    pub price: FixedPoint,
    pub quantity: FixedPoint,
    pub side: Side,
}

/// A position as the SDK reports it: product name and signed quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPosition {
    pub product_name: String,
    pub quantity: FixedPoint,
}

/// Mark and index price of one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub mark: Decimal,
    pub index: Decimal,
}

/// Limit orders rest on the book; market orders are limit orders priced
/// through the mark that the SDK submits with its taker path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderKind {
    Limit,
    Market,
}

/// Everything the SDK needs to place an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub kind: OrderKind,
    pub product_index: usize,
    pub is_bid: bool,
    pub price: FixedPoint,
    pub size: FixedPoint,
    pub referrer_trg: String,
    pub referrer_fee_bps: u16,
}

/// Transaction signature returned by the SDK once confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxSignature(pub String);

impl fmt::Display for TxSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A trader risk group owned by the connected wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraderAccount {
    pub pubkey: String,
}
