//! Submitting orders and funding transfers through the trader handle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;

use super::form::{FundingForm, LimitOrderForm, MarketOrderForm, OrderDirection};
use crate::config::ReferrerSettings;
use crate::error::{log_failure, ValidationError};
use crate::notifications::{Notification, Notifier};
use crate::trader::{FixedPoint, OrderRequest, ProductRef, TraderError, TraderHandle, TxSignature};

/// Shown while a funding transaction is being prepared
pub const FETCHING_BLOCKHASH: &str = "Fetching BlockHash...";

#[derive(Error, Debug)]
pub enum TradeError {
    #[error("Invalid form: {0}")]
    InvalidForm(#[from] ValidationError),

    /// Another action is still waiting for confirmation
    #[error("Another action is in progress")]
    Busy,

    #[error(transparent)]
    Trader(#[from] TraderError),
}

/// Clears the loading flag when the action finishes, however it finishes.
struct LoadingGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> LoadingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, TradeError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| TradeError::Busy)?;
        Ok(Self { flag })
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Places orders and moves funds for one trader account, one action at a
/// time, reporting every outcome through the notifier.
pub struct TradeExecutor {
    trader: Arc<dyn TraderHandle>,
    notifier: Arc<dyn Notifier>,
    referrer: ReferrerSettings,
    loading: AtomicBool,
}

impl TradeExecutor {
    pub fn new(
        trader: Arc<dyn TraderHandle>,
        notifier: Arc<dyn Notifier>,
        referrer: ReferrerSettings,
    ) -> Self {
        Self {
            trader,
            notifier,
            referrer,
            loading: AtomicBool::new(false),
        }
    }

    /// True while an action is waiting on the SDK
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    pub async fn place_limit(
        &self,
        form: &LimitOrderForm,
        product: &ProductRef,
    ) -> Result<TxSignature, TradeError> {
        let request = form.to_request(product, &self.referrer)?;
        self.submit_order(request, "Order Placed Successfully!".to_string())
            .await
    }

    /// Place a market order priced off `mark`.
    pub async fn place_market(
        &self,
        form: &MarketOrderForm,
        product: &ProductRef,
        mark: Option<Decimal>,
    ) -> Result<TxSignature, TradeError> {
        let request = form.to_request(product, mark, &self.referrer)?;
        let side = match form.direction {
            OrderDirection::Short => "Short",
            _ => "Long",
        };
        self.submit_order(request, format!("Market {} Order Placed Successfully!", side))
            .await
    }

    pub async fn deposit(&self, form: &FundingForm) -> Result<TxSignature, TradeError> {
        let amount = form.to_amount()?;
        self.run(
            "Deposit failed!",
            "Deposited successfully into trader account!",
            self.trader.deposit(amount),
            amount,
        )
        .await
    }

    pub async fn withdraw(&self, form: &FundingForm) -> Result<TxSignature, TradeError> {
        let amount = form.to_amount()?;
        self.run(
            "Withdrawal failed!",
            "Withdrawn successfully from trader account!",
            self.trader.withdraw(amount),
            amount,
        )
        .await
    }

    async fn submit_order(
        &self,
        request: OrderRequest,
        success: String,
    ) -> Result<TxSignature, TradeError> {
        let _loading = LoadingGuard::acquire(&self.loading)?;

        info!(
            "Placing {:?} {} order on product {}: {} @ {}",
            request.kind,
            if request.is_bid { "bid" } else { "ask" },
            request.product_index,
            request.size,
            request.price
        );

        match self.trader.new_order(request).await {
            Ok(txid) => {
                self.notifier
                    .notify(Notification::success(success).with_txid(&txid));
                Ok(txid)
            }
            Err(e) => {
                log_failure("Order placement failed", &e);
                self.notifier
                    .notify(Notification::error("Placing order failed!", e.to_string()));
                Err(e.into())
            }
        }
    }

    async fn run<F>(
        &self,
        failure: &str,
        success: &str,
        action: F,
        amount: FixedPoint,
    ) -> Result<TxSignature, TradeError>
    where
        F: std::future::Future<Output = Result<TxSignature, TraderError>>,
    {
        let _loading = LoadingGuard::acquire(&self.loading)?;
        info!("Funding action for {}", amount);
        self.notifier
            .notify(Notification::waiting(FETCHING_BLOCKHASH));

        match action.await {
            Ok(txid) => {
                self.notifier
                    .notify(Notification::success(success).with_txid(&txid));
                Ok(txid)
            }
            Err(e) => {
                log_failure(failure.trim_end_matches('!'), &e);
                self.notifier
                    .notify(Notification::error(failure, e.to_string()));
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_guard_rejects_second_holder() {
        let flag = AtomicBool::new(false);
        let guard = LoadingGuard::acquire(&flag).unwrap();
        assert!(matches!(LoadingGuard::acquire(&flag), Err(TradeError::Busy)));
        drop(guard);
        assert!(!flag.load(Ordering::Acquire));
        assert!(LoadingGuard::acquire(&flag).is_ok());
    }
}
