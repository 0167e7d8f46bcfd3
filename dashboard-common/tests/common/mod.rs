// Shared test doubles for the integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use tokio::sync::Notify;

use dashboard_common::accounts::AccountFigures;
use dashboard_common::notifications::{Notification, Notifier};
use dashboard_common::trader::{
    FixedPoint, OrderRecord, OrderRequest, PriceQuote, ProductInfo, RawPosition, Side,
    TraderAccount, TraderDirectory, TraderError, TraderHandle, TraderResult, TxSignature,
    UpdateCallback,
};

// ============================================================================
// Mock Trader
// ============================================================================

#[derive(Default)]
struct MockState {
    figures: AccountFigures,
    orders: Vec<OrderRecord>,
    positions: Vec<RawPosition>,
    products: Vec<ProductInfo>,
    quotes: HashMap<usize, PriceQuote>,
    callbacks: Option<(UpdateCallback, UpdateCallback)>,
    /// Error returned by the next figure read
    fail_reads: Option<TraderError>,
    /// Error returned by the next order, deposit or withdraw
    fail_next_tx: Option<TraderError>,
    requests: Vec<OrderRequest>,
    deposits: Vec<FixedPoint>,
    withdrawals: Vec<FixedPoint>,
    order_filters: Vec<Vec<String>>,
}

pub struct MockTrader {
    state: Mutex<MockState>,
    /// When set, `new_order` waits for a notification before answering
    order_gate: Mutex<Option<Arc<Notify>>>,
    /// Taken by the next `positions` read, which then waits on it
    refresh_gate: Mutex<Option<Arc<Notify>>>,
    pub mark_updates: AtomicUsize,
    pub figure_reads: AtomicUsize,
    pub disconnects: AtomicUsize,
    tx_counter: AtomicUsize,
}

impl MockTrader {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockState {
                products: default_products(),
                ..Default::default()
            }),
            order_gate: Mutex::new(None),
            refresh_gate: Mutex::new(None),
            mark_updates: AtomicUsize::new(0),
            figure_reads: AtomicUsize::new(0),
            disconnects: AtomicUsize::new(0),
            tx_counter: AtomicUsize::new(0),
        }
    }

    pub fn with_figures(self, v: Decimal, i: Decimal, m: Decimal) -> Self {
        self.set_figures(v, i, m);
        self
    }

    pub fn set_figures(&self, v: Decimal, i: Decimal, m: Decimal) {
        let mut state = self.state.lock();
        state.figures = AccountFigures {
            cash_balance: v - i,
            open_positions_value: Decimal::ZERO,
            portfolio_value: v,
            initial_margin_requirement: i,
            maintenance_margin_requirement: m,
            all_time_pnl: Decimal::ZERO,
        };
    }

    pub fn set_orders(&self, orders: Vec<OrderRecord>) {
        self.state.lock().orders = orders;
    }

    pub fn set_positions(&self, positions: Vec<RawPosition>) {
        self.state.lock().positions = positions;
    }

    pub fn set_products(&self, products: Vec<ProductInfo>) {
        self.state.lock().products = products;
    }

    pub fn set_quote(&self, product_index: usize, mark: Decimal, index: Decimal) {
        self.state
            .lock()
            .quotes
            .insert(product_index, PriceQuote { mark, index });
    }

    pub fn fail_reads_with(&self, err: TraderError) {
        self.state.lock().fail_reads = Some(err);
    }

    pub fn fail_next_tx_with(&self, err: TraderError) {
        self.state.lock().fail_next_tx = Some(err);
    }

    pub fn gate_orders(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.order_gate.lock() = Some(Arc::clone(&gate));
        gate
    }

    /// Hold the next account refresh until the returned gate is notified.
    pub fn gate_next_refresh(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.refresh_gate.lock() = Some(Arc::clone(&gate));
        gate
    }

    /// True once a refresh has picked up the gate and is waiting on it.
    pub fn refresh_held(&self) -> bool {
        self.refresh_gate.lock().is_none()
    }

    pub fn requests(&self) -> Vec<OrderRequest> {
        self.state.lock().requests.clone()
    }

    pub fn deposits(&self) -> Vec<FixedPoint> {
        self.state.lock().deposits.clone()
    }

    pub fn withdrawals(&self) -> Vec<FixedPoint> {
        self.state.lock().withdrawals.clone()
    }

    pub fn order_filters(&self) -> Vec<Vec<String>> {
        self.state.lock().order_filters.clone()
    }

    pub fn is_connected(&self) -> bool {
        self.state.lock().callbacks.is_some()
    }

    /// Simulate the SDK pushing an account update.
    pub fn push_account_update(&self) {
        let callback = self.state.lock().callbacks.as_ref().map(|(a, _)| Arc::clone(a));
        if let Some(cb) = callback {
            cb();
        }
    }

    pub fn push_market_update(&self) {
        let callback = self.state.lock().callbacks.as_ref().map(|(_, m)| Arc::clone(m));
        if let Some(cb) = callback {
            cb();
        }
    }

    fn read<T>(&self, f: impl FnOnce(&MockState) -> T) -> TraderResult<T> {
        self.figure_reads.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock();
        if let Some(err) = state.fail_reads.take() {
            return Err(err);
        }
        Ok(f(&state))
    }

    fn next_tx(&self) -> TraderResult<TxSignature> {
        if let Some(err) = self.state.lock().fail_next_tx.take() {
            return Err(err);
        }
        let n = self.tx_counter.fetch_add(1, Ordering::SeqCst);
        Ok(TxSignature(format!("tx-{}", n)))
    }
}

#[async_trait]
impl TraderHandle for MockTrader {
    async fn excess_margin(&self) -> TraderResult<Decimal> {
        self.read(|s| s.figures.cash_balance)
    }

    async fn position_value(&self) -> TraderResult<Decimal> {
        self.read(|s| s.figures.open_positions_value)
    }

    async fn portfolio_value(&self) -> TraderResult<Decimal> {
        self.read(|s| s.figures.portfolio_value)
    }

    async fn required_initial_margin(&self) -> TraderResult<Decimal> {
        self.read(|s| s.figures.initial_margin_requirement)
    }

    async fn required_maintenance_margin(&self) -> TraderResult<Decimal> {
        self.read(|s| s.figures.maintenance_margin_requirement)
    }

    async fn pnl(&self) -> TraderResult<Decimal> {
        self.read(|s| s.figures.all_time_pnl)
    }

    async fn open_orders(&self, products: &[String]) -> TraderResult<Vec<OrderRecord>> {
        let mut state = self.state.lock();
        state.order_filters.push(products.to_vec());
        Ok(state
            .orders
            .iter()
            .filter(|o| products.contains(&o.product_name))
            .cloned()
            .collect())
    }

    async fn positions(&self) -> TraderResult<Vec<RawPosition>> {
        let gate = self.refresh_gate.lock().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        Ok(self.state.lock().positions.clone())
    }

    fn connect(&self, on_account: UpdateCallback, on_market: UpdateCallback) -> TraderResult<()> {
        self.state.lock().callbacks = Some((on_account, on_market));
        Ok(())
    }

    fn disconnect(&self) {
        self.disconnects.fetch_add(1, Ordering::SeqCst);
        self.state.lock().callbacks = None;
    }

    async fn products(&self) -> TraderResult<Vec<ProductInfo>> {
        Ok(self.state.lock().products.clone())
    }

    async fn update_mark_prices(&self) -> TraderResult<()> {
        self.mark_updates.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn price_quote(&self, product_index: usize) -> TraderResult<PriceQuote> {
        self.state
            .lock()
            .quotes
            .get(&product_index)
            .copied()
            .ok_or_else(|| TraderError::UnknownProduct(product_index.to_string()))
    }

    async fn new_order(&self, request: OrderRequest) -> TraderResult<TxSignature> {
        let gate = self.order_gate.lock().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        let tx = self.next_tx()?;
        self.state.lock().requests.push(request);
        Ok(tx)
    }

    async fn deposit(&self, amount: FixedPoint) -> TraderResult<TxSignature> {
        let tx = self.next_tx()?;
        self.state.lock().deposits.push(amount);
        Ok(tx)
    }

    async fn withdraw(&self, amount: FixedPoint) -> TraderResult<TxSignature> {
        let tx = self.next_tx()?;
        self.state.lock().withdrawals.push(amount);
        Ok(tx)
    }
}

pub fn product(index: usize, name: &str, base_decimals: u32) -> ProductInfo {
    ProductInfo {
        index,
        name: name.to_string(),
        base_decimals,
        outright: true,
        uninitialized: false,
    }
}

pub fn default_products() -> Vec<ProductInfo> {
    vec![
        product(0, "BTCUSD-PERP", 4),
        product(1, "ETHUSD-PERP", 3),
        ProductInfo {
            outright: false,
            ..product(2, "BTC-ETH-COMBO", 4)
        },
        ProductInfo {
            uninitialized: true,
            ..product(3, "", 0)
        },
    ]
}

pub fn order(id: &str, product_name: &str, price: i64, quantity: i64, side: Side) -> OrderRecord {
    OrderRecord {
        id: id.to_string(),
        product_name: product_name.to_string(),
        product_index: 0,
        price: FixedPoint::new(price, 0),
        quantity: FixedPoint::new(quantity, -4),
        side,
    }
}

// ============================================================================
// Mock Directory
// ============================================================================

pub struct MockDirectory {
    pub accounts: Mutex<HashMap<String, Vec<TraderAccount>>>,
    pub fail_listing: Mutex<Option<TraderError>>,
    pub trader: Arc<MockTrader>,
}

impl MockDirectory {
    pub fn new(trader: Arc<MockTrader>) -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
            fail_listing: Mutex::new(None),
            trader,
        }
    }
}

#[async_trait]
impl TraderDirectory for MockDirectory {
    async fn trader_accounts(&self, owner: &str, _mpg: &str) -> TraderResult<Vec<TraderAccount>> {
        if let Some(err) = self.fail_listing.lock().take() {
            return Err(err);
        }
        Ok(self.accounts.lock().get(owner).cloned().unwrap_or_default())
    }

    async fn create_trader_account(&self, mpg: &str) -> TraderResult<TxSignature> {
        // the mock wallet is always "owner"
        let mut accounts = self.accounts.lock();
        let list = accounts.entry("owner".to_string()).or_default();
        list.push(TraderAccount {
            pubkey: format!("trg-{}-{}", mpg, list.len()),
        });
        Ok(TxSignature("create-tx".to_string()))
    }

    async fn open_trader(
        &self,
        _account: &TraderAccount,
        _mpg: &str,
    ) -> TraderResult<Arc<dyn TraderHandle>> {
        Ok(Arc::clone(&self.trader) as Arc<dyn TraderHandle>)
    }
}

// ============================================================================
// Recording Notifier
// ============================================================================

#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn all(&self) -> Vec<Notification> {
        self.seen.lock().clone()
    }

    pub fn last(&self) -> Option<Notification> {
        self.seen.lock().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().push(notification);
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Poll `check` until it holds or a second passes.
pub async fn eventually<F>(mut check: F) -> bool
where
    F: FnMut() -> bool,
{
    for _ in 0..100 {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}
