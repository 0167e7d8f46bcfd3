//! Choosing the trader account a session works on.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::display::format_pub_key;
use crate::error::log_failure;
use crate::notifications::{Notification, Notifier};
use crate::trader::{TraderAccount, TraderDirectory, TraderError, TraderHandle};

#[derive(Error, Debug)]
pub enum SelectionError {
    /// No wallet connected, nothing to list
    #[error("Wallet not connected")]
    WalletNotConnected,

    /// No market product group configured for this network
    #[error("No market product group configured")]
    NoProductGroup,

    #[error(transparent)]
    Trader(#[from] TraderError),
}

/// Lists, creates and opens trader accounts for the connected wallet.
pub struct AccountSelector {
    directory: Arc<dyn TraderDirectory>,
    notifier: Arc<dyn Notifier>,
    mpg: Option<String>,
}

impl AccountSelector {
    pub fn new(
        directory: Arc<dyn TraderDirectory>,
        notifier: Arc<dyn Notifier>,
        mpg: Option<String>,
    ) -> Self {
        Self {
            directory,
            notifier,
            mpg,
        }
    }

    fn mpg(&self) -> Result<&str, SelectionError> {
        self.mpg.as_deref().ok_or(SelectionError::NoProductGroup)
    }

    /// Trader accounts of `owner`; failures are also surfaced to the user.
    pub async fn list(&self, owner: Option<&str>) -> Result<Vec<TraderAccount>, SelectionError> {
        let owner = owner.ok_or(SelectionError::WalletNotConnected)?;
        let mpg = self.mpg()?;

        match self.directory.trader_accounts(owner, mpg).await {
            Ok(accounts) => {
                info!(
                    "Found {} trader accounts for {}",
                    accounts.len(),
                    format_pub_key(owner)
                );
                Ok(accounts)
            }
            Err(e) => {
                log_failure("Listing trader accounts failed", &e);
                self.notifier.notify(Notification::error(
                    "Selecting Trader Account failed!",
                    e.to_string(),
                ));
                Err(e.into())
            }
        }
    }

    /// Create a trader account, then list again so the new one shows up.
    pub async fn create(&self, owner: Option<&str>) -> Result<Vec<TraderAccount>, SelectionError> {
        let owner_key = owner.ok_or(SelectionError::WalletNotConnected)?;
        let mpg = self.mpg()?;

        if let Err(e) = self.directory.create_trader_account(mpg).await {
            log_failure(
                &format!("Creating trader account for {} failed", format_pub_key(owner_key)),
                &e,
            );
            self.notifier.notify(Notification::error(
                "Creating Trader Account failed!",
                e.to_string(),
            ));
            return Err(e.into());
        }

        self.list(owner).await
    }

    /// Open a trader handle for the chosen account.
    pub async fn open(
        &self,
        account: &TraderAccount,
    ) -> Result<Arc<dyn TraderHandle>, SelectionError> {
        let mpg = self.mpg()?;
        match self.directory.open_trader(account, mpg).await {
            Ok(trader) => {
                info!("Opened trader account {}", format_pub_key(&account.pubkey));
                Ok(trader)
            }
            Err(e) => {
                self.notifier.notify(Notification::error(
                    "Selecting Trader Account failed!",
                    e.to_string(),
                ));
                Err(e.into())
            }
        }
    }
}
