//! Live state of one opened trader account.
//!
//! [`TraderSession`] is shared behind an `Arc` by everything that renders or
//! acts on the account. Background work attaches to it through guards
//! ([`RefreshSubscription`], [`PricePoller`]) that stop the work on drop.

mod prices;
mod refresher;
mod state;

pub use prices::{PriceBoard, PricePoller};
pub use refresher::{RefreshSubscription, RefreshTrigger, SnapshotStore};
pub use state::TraderSession;
