//! Configuration for share counter lookups

use std::time::Duration;

/// Default timeout for direct counter requests in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default timeout for proxied Facebook attempts in seconds
pub const DEFAULT_PROXY_TIMEOUT_SECS: u64 = 5;

/// Default number of proxied Facebook attempts
pub const DEFAULT_MAX_PROXY_ATTEMPTS: usize = 15;

/// Substring Facebook puts in the body once its API limit is hit
pub const DEFAULT_RATE_LIMIT_MARKER: &str = "request limit reached";

/// Default user agent for direct requests
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// User agent sent on proxied attempts, posing as a mobile browser
pub const MOBILE_USER_AGENT: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 14_6 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.1.1 Mobile/15E148 Safari/604.1";

/// Placeholder replaced by the percent-encoded target URL
pub const URL_PLACEHOLDER: &str = "{url}";

/// Counter endpoint templates, one per network with a public counter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Returns `{"id": url, "share": {"share_count": n, ...}}`
    pub facebook: String,
    /// Returns `VK.Share.count(index, n);`
    pub vk: String,
    /// Returns `ODKL.updateCount('pageshares','n');`
    pub ok: String,
    /// Returns `pageshares({"url":{"shares":n,"clicks":m}});`
    pub moymir: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            facebook: "https://graph.facebook.com/{url}".to_string(),
            vk: "https://vk.com/share.php?act=count&index=1234&url={url}".to_string(),
            ok: "https://connect.ok.ru/dk?st.cmd=extLike&uid=pageshares&callback=?&ref={url}"
                .to_string(),
            moymir: "https://connect.mail.ru/share_count?callback=1&func=pageshares&url_list={url}"
                .to_string(),
        }
    }
}

impl Endpoints {
    /// Point every endpoint at `base`, keeping the default paths and queries.
    ///
    /// Mostly useful for running against a local mock server.
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            facebook: format!("{base}/graph/{{url}}"),
            vk: format!("{base}/vk/share.php?act=count&index=1234&url={{url}}"),
            ok: format!("{base}/ok/dk?st.cmd=extLike&uid=pageshares&callback=?&ref={{url}}"),
            moymir: format!(
                "{base}/mailru/share_count?callback=1&func=pageshares&url_list={{url}}"
            ),
        }
    }
}

/// Configuration for [`crate::ShareCounter`]
#[derive(Debug, Clone)]
pub struct CounterConfig {
    /// Timeout for direct requests
    pub timeout: Duration,
    /// Timeout for each proxied Facebook attempt
    pub proxy_timeout: Duration,
    /// Upper bound on proxied Facebook attempts
    pub max_proxy_attempts: usize,
    /// Body substring that marks a rate-limited Facebook answer
    pub rate_limit_marker: String,
    /// User agent for direct requests
    pub user_agent: String,
    /// User agent for proxied attempts
    pub mobile_user_agent: String,
    pub endpoints: Endpoints,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            proxy_timeout: Duration::from_secs(DEFAULT_PROXY_TIMEOUT_SECS),
            max_proxy_attempts: DEFAULT_MAX_PROXY_ATTEMPTS,
            rate_limit_marker: DEFAULT_RATE_LIMIT_MARKER.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            mobile_user_agent: MOBILE_USER_AGENT.to_string(),
            endpoints: Endpoints::default(),
        }
    }
}

impl CounterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_proxy_timeout(mut self, timeout: Duration) -> Self {
        self.proxy_timeout = timeout;
        self
    }

    pub fn with_max_proxy_attempts(mut self, attempts: usize) -> Self {
        self.max_proxy_attempts = attempts;
        self
    }

    pub fn with_rate_limit_marker(mut self, marker: String) -> Self {
        self.rate_limit_marker = marker;
        self
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Whether `body` carries the configured rate-limit marker
    pub fn is_rate_limited(&self, body: &str) -> bool {
        body.to_lowercase()
            .contains(&self.rate_limit_marker.to_lowercase())
    }
}
