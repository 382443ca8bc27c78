//! Proxy suppliers handed to counters that may need to route around blocks

use crate::error::ProxyError;
use crate::proxy::checker::ProxyChecker;
use crate::proxy::models::{Proxy, ProxyType};
use crate::Result;
use async_trait::async_trait;
use log::{debug, info};
use std::fs;
use std::path::Path;
use std::sync::Mutex;

/// Source of outbound proxies.
///
/// `current` returns the last proxy known to work (or the first candidate);
/// `rotate` discards it and returns a replacement, which becomes current.
#[async_trait]
pub trait ProxySupplier: Send + Sync {
    async fn current(&self) -> std::result::Result<Proxy, ProxyError>;

    async fn rotate(&self) -> std::result::Result<Proxy, ProxyError>;
}

/// Round-robin supplier over a fixed list of proxies
#[derive(Debug, Default)]
pub struct ProxyPool {
    proxies: Vec<Proxy>,
    cursor: Mutex<usize>,
}

impl ProxyPool {
    pub fn new(proxies: Vec<Proxy>) -> Self {
        Self {
            proxies,
            cursor: Mutex::new(0),
        }
    }

    /// A pool that never yields a proxy
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a proxy list, one entry per line.
    ///
    /// Blank lines and `#` comments are skipped; anything else that fails to
    /// parse is an error naming the offending line.
    pub fn parse_list(content: &str, default_type: ProxyType) -> std::result::Result<Self, ProxyError> {
        let proxies = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(|line| Proxy::parse_with_type(line, default_type))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self::new(proxies))
    }

    /// Load a proxy list file
    pub fn from_file<P: AsRef<Path>>(path: P, default_type: ProxyType) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let pool = Self::parse_list(&content, default_type)?;
        info!("Loaded {} proxies", pool.len());
        Ok(pool)
    }

    /// Check every proxy and keep only the ones that answered
    pub async fn retain_working(self, checker: &ProxyChecker) -> Self {
        let before = self.proxies.len();
        let working: Vec<Proxy> = checker
            .check_proxies(self.proxies)
            .await
            .into_iter()
            .filter(|result| result.is_working())
            .map(|result| result.proxy)
            .collect();
        info!("{} of {} proxies passed the check", working.len(), before);
        Self::new(working)
    }

    pub fn len(&self) -> usize {
        self.proxies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }

    pub fn proxies(&self) -> &[Proxy] {
        &self.proxies
    }

    fn lock_cursor(&self) -> std::sync::MutexGuard<'_, usize> {
        // the cursor is a plain index, a poisoned lock still holds a usable value
        self.cursor.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ProxySupplier for ProxyPool {
    async fn current(&self) -> std::result::Result<Proxy, ProxyError> {
        let cursor = self.lock_cursor();
        self.proxies.get(*cursor).cloned().ok_or(ProxyError::Exhausted)
    }

    async fn rotate(&self) -> std::result::Result<Proxy, ProxyError> {
        if self.proxies.is_empty() {
            return Err(ProxyError::Exhausted);
        }
        let mut cursor = self.lock_cursor();
        *cursor = (*cursor + 1) % self.proxies.len();
        let next = self.proxies[*cursor].clone();
        debug!("Rotated to proxy {}", next);
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> ProxyPool {
        ProxyPool::new(vec![
            Proxy::new("10.0.0.1", 8080, ProxyType::Http),
            Proxy::new("10.0.0.2", 8080, ProxyType::Http),
            Proxy::new("10.0.0.3", 1080, ProxyType::Socks5),
        ])
    }

    #[tokio::test]
    async fn test_current_is_stable_until_rotated() {
        let pool = pool();
        assert_eq!(pool.current().await.unwrap().host, "10.0.0.1");
        assert_eq!(pool.current().await.unwrap().host, "10.0.0.1");

        let next = pool.rotate().await.unwrap();
        assert_eq!(next.host, "10.0.0.2");
        assert_eq!(pool.current().await.unwrap(), next);
    }

    #[tokio::test]
    async fn test_rotate_wraps_around() {
        let pool = pool();
        for _ in 0..3 {
            pool.rotate().await.unwrap();
        }
        assert_eq!(pool.current().await.unwrap().host, "10.0.0.1");
    }

    #[tokio::test]
    async fn test_empty_pool() {
        let pool = ProxyPool::empty();
        assert!(matches!(pool.current().await, Err(ProxyError::Exhausted)));
        assert!(matches!(pool.rotate().await, Err(ProxyError::Exhausted)));
    }

    #[test]
    fn test_parse_list() {
        let content = r#"
# HTTP proxies
192.168.1.1:8080
192.168.1.2:8080:user:pass

socks5://192.168.1.3:1080
"#;
        let pool = ProxyPool::parse_list(content, ProxyType::Http).unwrap();
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.proxies()[2].proxy_type, ProxyType::Socks5);
    }

    #[test]
    fn test_parse_list_rejects_garbage() {
        let err = ProxyPool::parse_list("192.168.1.1:8080\nnot a proxy\n", ProxyType::Http).unwrap_err();
        assert!(matches!(err, ProxyError::InvalidEntry(line) if line == "not a proxy"));
    }
}
