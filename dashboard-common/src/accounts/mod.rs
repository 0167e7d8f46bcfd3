//! Account state derived from the trader handle.
//!
//! # Components
//! - [`AccountHealth`] / [`classify_health`]: six ordered risk tiers from
//!   portfolio value and margin requirements
//! - [`AccountSnapshot`]: one consistent capture of the account's figures,
//!   orders and positions, with health and leverage derived from it
//! - [`AccountSelector`]: listing, creating and opening trader accounts
//!
//! # Example
//!
//! ```ignore
//! use dashboard_common::accounts::{classify_health, AccountHealth};
//! use rust_decimal_macros::dec;
//!
//! let health = classify_health(dec!(150), dec!(100), dec!(50));
//! assert_eq!(health, AccountHealth::HealthyAtRisk);
//! ```

mod health;
mod selection;
mod snapshot;

pub use health::{classify_health, AccountHealth};
pub use selection::{AccountSelector, SelectionError};
pub use snapshot::{AccountFigures, AccountSnapshot};
