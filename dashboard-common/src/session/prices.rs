use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use rust_decimal::Decimal;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::debug;

use super::state::TraderSession;
use crate::error::log_failure;
use crate::trader::PriceQuote;

/// Latest mark and index price per product name.
#[derive(Debug, Default)]
pub struct PriceBoard {
    quotes: RwLock<HashMap<String, PriceQuote>>,
}

impl PriceBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, product: &str, quote: PriceQuote) {
        self.quotes.write().insert(product.to_string(), quote);
    }

    pub fn quote(&self, product: &str) -> Option<PriceQuote> {
        self.quotes.read().get(product).copied()
    }

    pub fn mark(&self, product: &str) -> Option<Decimal> {
        self.quote(product).map(|q| q.mark)
    }

    /// Mark prices of every product seen so far
    pub fn marks(&self) -> HashMap<String, Decimal> {
        self.quotes
            .read()
            .iter()
            .map(|(name, q)| (name.clone(), q.mark))
            .collect()
    }
}

/// Periodically refreshes the selected product's prices. Stops when dropped.
pub struct PricePoller {
    task: JoinHandle<()>,
}

impl PricePoller {
    pub fn spawn(session: Arc<TraderSession>, period: Duration) -> Self {
        let period = period.max(Duration::from_millis(1));
        let task = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                match session.refresh_prices().await {
                    Ok(Some(quote)) => debug!(mark = %quote.mark, index = %quote.index, "Prices refreshed"),
                    Ok(None) => {}
                    Err(e) => log_failure("Price refresh failed", &e),
                }
            }
        });
        Self { task }
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for PricePoller {
    fn drop(&mut self) {
        self.task.abort();
    }
}
