//! Order entry and funding.

mod form;
mod placement;

pub use form::{FundingForm, LimitOrderForm, MarketOrderForm, OrderDirection};
pub use placement::{TradeError, TradeExecutor, FETCHING_BLOCKHASH};
