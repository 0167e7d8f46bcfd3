// dashboard-common: account, order and session logic for the Dexterity dashboard
// Used by dashboard-core (proxy server + CLI) and any front end embedding the session

pub mod accounts;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod network;
pub mod notifications;
pub mod orders;
pub mod session;
pub mod trader;
