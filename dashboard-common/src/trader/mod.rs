//! The trader handle: the external SDK object for one on-chain margin account.
//!
//! Everything that involves margin math, valuation or order matching happens
//! behind [`TraderHandle`]. This crate only reads its figures, turns them
//! into snapshots, and submits orders and transfers through it.

mod error;
mod handle;
mod types;

pub use error::{TraderError, TraderResult};
pub use handle::{TraderDirectory, TraderHandle, UpdateCallback};
pub use types::{
    FixedPoint, OrderKind, OrderRecord, OrderRequest, PriceQuote, ProductInfo, ProductRef,
    RawPosition, Side, TraderAccount, TxSignature,
};
