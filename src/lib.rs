//! Social Share - share links and share counters
//!
//! Builds "share this" URLs for Twitter, Facebook, VK, OK.ru, Moy Mir and
//! Pocket, and fetches public share counters from the networks that expose
//! one. Facebook lookups can fall back to rotating outbound proxies.

pub mod config;
pub mod error;
pub mod logging;
pub mod proxy;
pub mod share;

pub use config::{CounterConfig, Endpoints};
pub use error::{CountError, CountResult, ProxyError};
pub use proxy::*;
pub use share::*;

/// Application result type
pub type Result<T> = anyhow::Result<T>;
