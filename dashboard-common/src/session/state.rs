use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use tracing::{debug, info};

use super::prices::PriceBoard;
use super::refresher::SnapshotStore;
use crate::accounts::{AccountFigures, AccountSnapshot};
use crate::display::{
    AccountInfoView, OrderRowView, PositionRowView, ProductHeaderView, ProductPricesView,
};
use crate::trader::{
    PriceQuote, ProductInfo, ProductRef, TraderError, TraderHandle, TraderResult,
};

/// Everything the dashboard knows about the opened trader account.
pub struct TraderSession {
    trader: Arc<dyn TraderHandle>,
    mpg: Option<String>,
    selected: RwLock<ProductRef>,
    prices: PriceBoard,
    snapshots: SnapshotStore,
}

impl TraderSession {
    pub fn new(trader: Arc<dyn TraderHandle>, mpg: Option<String>) -> Self {
        Self {
            trader,
            mpg,
            selected: RwLock::new(ProductRef::default()),
            prices: PriceBoard::new(),
            snapshots: SnapshotStore::new(),
        }
    }

    pub fn trader(&self) -> &Arc<dyn TraderHandle> {
        &self.trader
    }

    pub fn mpg(&self) -> Option<&str> {
        self.mpg.as_deref()
    }

    pub fn selected_product(&self) -> ProductRef {
        self.selected.read().clone()
    }

    pub fn prices(&self) -> &PriceBoard {
        &self.prices
    }

    pub fn snapshot(&self) -> Option<Arc<AccountSnapshot>> {
        self.snapshots.latest()
    }

    /// Outright products of the market product group.
    pub async fn selectable_products(&self) -> TraderResult<Vec<ProductInfo>> {
        let products = self.trader.products().await?;
        Ok(products.into_iter().filter(|p| p.outright).collect())
    }

    /// Switch the session to the outright product called `name`.
    pub async fn select_product(&self, name: &str) -> TraderResult<ProductRef> {
        let product = self
            .selectable_products()
            .await?
            .into_iter()
            .find(|p| p.name == name)
            .map(|p| p.to_ref())
            .ok_or_else(|| TraderError::UnknownProduct(name.to_string()))?;

        info!(
            "Selected product {} (index {}, min size {})",
            product.name, product.index, product.min_size
        );
        *self.selected.write() = product.clone();
        Ok(product)
    }

    /// Pull every account figure from the trader, then commit them as one
    /// snapshot. Nothing is committed if any read fails.
    pub async fn refresh_account(&self) -> TraderResult<Arc<AccountSnapshot>> {
        let product = self.selected_product();
        let filter = [product.name];
        let trader = &self.trader;

        let (
            cash_balance,
            open_positions_value,
            portfolio_value,
            initial_margin_requirement,
            maintenance_margin_requirement,
            all_time_pnl,
            orders,
            positions,
        ) = tokio::try_join!(
            trader.excess_margin(),
            trader.position_value(),
            trader.portfolio_value(),
            trader.required_initial_margin(),
            trader.required_maintenance_margin(),
            trader.pnl(),
            trader.open_orders(&filter),
            trader.positions(),
        )?;

        let figures = AccountFigures {
            cash_balance,
            open_positions_value,
            portfolio_value,
            initial_margin_requirement,
            maintenance_margin_requirement,
            all_time_pnl,
        };
        let snapshot = AccountSnapshot::capture(figures, orders, positions, Utc::now());
        debug!(
            health = %snapshot.health(),
            portfolio_value = %snapshot.portfolio_value(),
            "Committing account snapshot"
        );
        Ok(self.snapshots.commit(snapshot))
    }

    /// Refresh mark and index price of the selected product.
    ///
    /// Returns `None` without touching the SDK when the product slot is
    /// uninitialized, a combo, or not listed.
    pub async fn refresh_prices(&self) -> TraderResult<Option<PriceQuote>> {
        let selected = self.selected_product();
        let products = self.trader.products().await?;

        let Some(product) = products.iter().find(|p| p.index == selected.index) else {
            return Ok(None);
        };
        if !product.is_tradable() {
            return Ok(None);
        }

        self.trader.update_mark_prices().await?;
        let quote = self.trader.price_quote(product.index).await?;
        self.prices.set(&product.name, quote);
        Ok(Some(quote))
    }

    /// Mark price of the selected product, once known
    pub fn mark_price(&self) -> Option<Decimal> {
        self.prices.mark(&self.selected.read().name)
    }

    pub fn account_info(&self, now: DateTime<Utc>) -> Option<AccountInfoView> {
        self.snapshot()
            .map(|s| AccountInfoView::from_snapshot(&s, now))
    }

    pub fn product_prices(&self) -> Option<ProductPricesView> {
        let product = self.selected_product();
        self.prices
            .quote(&product.name)
            .map(|quote| ProductPricesView::new(&product, &quote))
    }

    pub fn open_orders(&self) -> Vec<OrderRowView> {
        self.snapshot()
            .map(|s| OrderRowView::rows(s.orders()))
            .unwrap_or_default()
    }

    pub fn open_positions(&self) -> Vec<PositionRowView> {
        self.snapshot()
            .map(|s| PositionRowView::rows(s.positions(), &self.prices.marks()))
            .unwrap_or_default()
    }

    pub fn header(&self) -> ProductHeaderView {
        ProductHeaderView::new(self.mpg(), &self.selected_product())
    }
}
