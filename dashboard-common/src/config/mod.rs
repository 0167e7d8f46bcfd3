//! Process configuration for the dashboard.
//!
//! Settings come from an optional TOML file (`config/<RUN_MODE>.toml`),
//! `DEXTERITY__<SECTION>__<KEY>` environment variables, and a handful of
//! well-known variables that deployments already set:
//!
//! | Variable       | Setting             |
//! |----------------|---------------------|
//! | `DEVNET_RPC`   | `rpc.devnet_url`    |
//! | `MAINNET_RPC`  | `rpc.mainnet_url`   |
//! | `REFERRER_TRG` | `referrer.trg`      |
//! | `REFERRER_BPS` | `referrer.fee_bps`  |
//!
//! None of these values are user input; the order entry forms never see them.

mod settings;

pub use settings::{
    NetworkSettings, ReferrerSettings, RefreshSettings, RpcSettings, ServerSettings, Settings,
};
