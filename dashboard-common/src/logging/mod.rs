//! Logging setup for the dashboard binaries.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Standard tracing filter (e.g., `info`, `dashboard_common=debug`)
//! - `LOG_FORMAT`: `pretty` (default), `compact`, or `json`
//! - `LOG_TIMESTAMPS`: `local` (default), `utc`, or `none`
//! - `LOG_LEVEL`: fallback level when `RUST_LOG` is unset
//! - `LOG_LOCATION`: `true`/`false` for file:line info
//!
//! # Usage
//!
//! ```rust,ignore
//! use dashboard_common::logging::{init_logging, LogConfig};
//!
//! init_logging(LogConfig::from_env())?;
//! ```

mod config;

pub use self::config::{init_logging, LogConfig, LogFormat, TimestampFormat};
