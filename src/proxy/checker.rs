//! Proxy checker used to weed out dead proxies before a pool is used

use crate::proxy::models::{Proxy, ProxyCheckResult, ProxyCheckStatus};
use futures::stream::{self, StreamExt};
use log::debug;
use reqwest::Client;
use std::time::{Duration, Instant};

/// Default timeout for proxy checks in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Default number of concurrent checks
const DEFAULT_CONCURRENCY: usize = 10;

/// Default URL to test proxies against
const DEFAULT_TEST_URL: &str = "http://httpbin.org/ip";

/// Configuration for proxy checker
#[derive(Debug, Clone)]
pub struct CheckerConfig {
    /// Timeout for each proxy check
    pub timeout: Duration,
    /// Number of concurrent checks
    pub concurrency: usize,
    /// URL to test proxies against
    pub test_url: String,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            concurrency: DEFAULT_CONCURRENCY,
            test_url: DEFAULT_TEST_URL.to_string(),
        }
    }
}

impl CheckerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_test_url(mut self, url: String) -> Self {
        self.test_url = url;
        self
    }
}

/// Checks that proxies answer a plain GET within the configured timeout
#[derive(Debug, Clone, Default)]
pub struct ProxyChecker {
    config: CheckerConfig,
}

impl ProxyChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CheckerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// Check a single proxy
    pub async fn check_proxy(&self, proxy: &Proxy) -> ProxyCheckResult {
        let start = Instant::now();

        let status = match self.create_client(proxy) {
            Ok(client) => match client.get(&self.config.test_url).send().await {
                Ok(response) if response.status().is_success() => ProxyCheckStatus::Working {
                    response_time_ms: start.elapsed().as_millis() as u64,
                },
                Ok(response) => {
                    ProxyCheckStatus::Failed(format!("HTTP status: {}", response.status()))
                }
                Err(e) if e.is_timeout() => ProxyCheckStatus::Timeout,
                Err(e) => ProxyCheckStatus::Failed(e.to_string()),
            },
            Err(reason) => ProxyCheckStatus::Failed(reason),
        };

        debug!("Checked proxy {}: {:?}", proxy, status);
        ProxyCheckResult {
            proxy: proxy.clone(),
            status,
        }
    }

    /// Check multiple proxies concurrently, preserving input order
    pub async fn check_proxies(&self, proxies: Vec<Proxy>) -> Vec<ProxyCheckResult> {
        stream::iter(proxies)
            .map(|proxy| async move { self.check_proxy(&proxy).await })
            .buffered(self.config.concurrency)
            .collect()
            .await
    }

    fn create_client(&self, proxy: &Proxy) -> Result<Client, String> {
        let reqwest_proxy = proxy.to_reqwest().map_err(|e| e.to_string())?;

        Client::builder()
            .proxy(reqwest_proxy)
            .timeout(self.config.timeout)
            .build()
            .map_err(|e| e.to_string())
    }
}
