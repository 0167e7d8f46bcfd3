//! Error types shared across the dashboard crates.
//!
//! This module provides:
//! - Common error types reused by the session, order and proxy layers
//! - Error classification so callers can tell transient SDK failures from
//!   bad input without matching on every variant
//!
//! # Usage
//!
//! ```rust,ignore
//! use dashboard_common::error::{log_failure, ErrorClassification};
//!
//! if let Err(e) = trader.deposit(amount).await {
//!     log_failure("Deposit", &e);
//!     if e.is_transient() {
//!         // tell the user to try again
//!     }
//! }
//! ```

mod common;
mod traits;

pub use common::*;
pub use traits::*;
