use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::error::TraderResult;
use super::types::{
    FixedPoint, OrderRecord, OrderRequest, PriceQuote, ProductInfo, RawPosition, TraderAccount,
    TxSignature,
};

/// Callback the SDK invokes when it has fresh account or market state.
pub type UpdateCallback = Arc<dyn Fn() + Send + Sync>;

/// One on-chain margin account, as exposed by the trading SDK.
///
/// Figures are whatever the SDK last loaded; the implementation decides
/// whether an accessor hits the network.
#[async_trait]
pub trait TraderHandle: Send + Sync {
    /// Excess initial margin ignoring open orders (the "cash balance")
    async fn excess_margin(&self) -> TraderResult<Decimal>;

    /// Mark value of all open positions
    async fn position_value(&self) -> TraderResult<Decimal>;

    async fn portfolio_value(&self) -> TraderResult<Decimal>;

    async fn required_initial_margin(&self) -> TraderResult<Decimal>;

    async fn required_maintenance_margin(&self) -> TraderResult<Decimal>;

    /// All-time PnL
    async fn pnl(&self) -> TraderResult<Decimal>;

    /// Resting orders on the given products
    async fn open_orders(&self, products: &[String]) -> TraderResult<Vec<OrderRecord>>;

    async fn positions(&self) -> TraderResult<Vec<RawPosition>>;

    /// Start pushing updates. `on_account` fires when the margin account
    /// changes, `on_market` when market state does.
    ///
    /// Implementations must not invoke a callback again while a previous
    /// invocation is still running.
    fn connect(&self, on_account: UpdateCallback, on_market: UpdateCallback) -> TraderResult<()>;

    /// Stop pushing updates. Safe to call when not connected.
    fn disconnect(&self);

    /// Products of the trader's market product group
    async fn products(&self) -> TraderResult<Vec<ProductInfo>>;

    /// Reload mark prices from chain
    async fn update_mark_prices(&self) -> TraderResult<()>;

    /// Last loaded mark and index price for a product
    async fn price_quote(&self, product_index: usize) -> TraderResult<PriceQuote>;

    async fn new_order(&self, request: OrderRequest) -> TraderResult<TxSignature>;

    async fn deposit(&self, amount: FixedPoint) -> TraderResult<TxSignature>;

    async fn withdraw(&self, amount: FixedPoint) -> TraderResult<TxSignature>;
}

/// Wallet-level view of the exchange: which trader accounts exist and how
/// to open one.
#[async_trait]
pub trait TraderDirectory: Send + Sync {
    /// Trader accounts owned by `owner` inside market product group `mpg`
    async fn trader_accounts(&self, owner: &str, mpg: &str) -> TraderResult<Vec<TraderAccount>>;

    async fn create_trader_account(&self, mpg: &str) -> TraderResult<TxSignature>;

    /// Load a trader handle for an account, with state and orderbooks fetched
    async fn open_trader(
        &self,
        account: &TraderAccount,
        mpg: &str,
    ) -> TraderResult<Arc<dyn TraderHandle>>;
}
