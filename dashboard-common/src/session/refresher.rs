use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use super::state::TraderSession;
use crate::accounts::AccountSnapshot;
use crate::error::log_failure;
use crate::trader::{TraderHandle, TraderResult, UpdateCallback};

/// Holds the latest committed snapshot. Commits replace it whole; the last
/// commit wins.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    current: RwLock<Option<Arc<AccountSnapshot>>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest(&self) -> Option<Arc<AccountSnapshot>> {
        self.current.read().clone()
    }

    pub fn commit(&self, snapshot: AccountSnapshot) -> Arc<AccountSnapshot> {
        let snapshot = Arc::new(snapshot);
        *self.current.write() = Some(Arc::clone(&snapshot));
        snapshot
    }
}

/// Why a refresh was requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    Initial,
    Account,
    Market,
}

/// Keeps a session's snapshot in sync with SDK pushes.
///
/// Dropping it disconnects the trader handle and stops the worker.
pub struct RefreshSubscription {
    trader: Arc<dyn TraderHandle>,
    worker: JoinHandle<()>,
}

impl RefreshSubscription {
    /// Connect the session's trader and refresh on every push.
    ///
    /// The SDK callbacks only queue a trigger. A single worker runs the
    /// refreshes one after another, folding triggers that pile up during a
    /// refresh into one follow-up refresh. An initial refresh is queued
    /// right away.
    pub fn attach(session: Arc<TraderSession>) -> TraderResult<Self> {
        let (tx, mut rx) = mpsc::unbounded_channel();

        let on_account: UpdateCallback = {
            let tx = tx.clone();
            Arc::new(move || {
                let _ = tx.send(RefreshTrigger::Account);
            })
        };
        let on_market: UpdateCallback = {
            let tx = tx.clone();
            Arc::new(move || {
                let _ = tx.send(RefreshTrigger::Market);
            })
        };

        let trader = Arc::clone(session.trader());
        trader.connect(on_account, on_market)?;
        let _ = tx.send(RefreshTrigger::Initial);

        let worker = tokio::spawn(async move {
            while let Some(trigger) = rx.recv().await {
                let mut coalesced = 0usize;
                while rx.try_recv().is_ok() {
                    coalesced += 1;
                }
                debug!(?trigger, coalesced, "Refreshing account snapshot");

                if let Err(e) = session.refresh_account().await {
                    log_failure("Account refresh failed", &e);
                }
            }
        });

        Ok(Self { trader, worker })
    }

    pub fn is_active(&self) -> bool {
        !self.worker.is_finished()
    }
}

impl Drop for RefreshSubscription {
    fn drop(&mut self) {
        self.trader.disconnect();
        self.worker.abort();
    }
}
