//! Manifest proxy.
//!
//! Forwards `publicKey` lookups to the RPC provider of the requested
//! network so the browser never sees provider URLs or keys.

mod errors;
mod handler;

pub use errors::ProxyError;
pub use handler::{ManifestProxy, ManifestQuery, ProxyReply};
