//! Proxy module for the outbound proxies used by share counters
//!
//! This module provides:
//! - Proxy models and parsing from the usual list formats
//! - The `ProxySupplier` capability and a round-robin `ProxyPool`
//! - A concurrent checker to drop dead proxies from a pool

pub mod checker;
pub mod models;
pub mod supplier;

pub use checker::{CheckerConfig, ProxyChecker};
pub use models::{Proxy, ProxyAuth, ProxyCheckResult, ProxyCheckStatus, ProxyType};
pub use supplier::{ProxyPool, ProxySupplier};
