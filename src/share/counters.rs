//! Share counter fetchers

use crate::config::{CounterConfig, URL_PLACEHOLDER};
use crate::error::{CountError, CountResult};
use crate::proxy::{Proxy, ProxySupplier};
use crate::share::links::encode;
use crate::share::parse::{parse_facebook, parse_moymir, parse_ok, parse_vk};
use crate::share::Network;
use crate::Result;
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, REFERER, USER_AGENT};
use reqwest::Client;

/// Fetches share counters for URLs
pub struct ShareCounter {
    config: CounterConfig,
    client: Client,
}

impl ShareCounter {
    /// Create a share counter with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(CounterConfig::default())
    }

    /// Create a share counter with custom configuration
    pub fn with_config(config: CounterConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &CounterConfig {
        &self.config
    }

    /// Fetch the counter of `network`.
    ///
    /// `proxies` is only consulted by Facebook when the direct request fails.
    pub async fn count(&self, network: Network, url: &str, proxies: &dyn ProxySupplier) -> CountResult {
        match network {
            Network::Facebook => self.facebook(url, proxies).await,
            Network::Vk => self.vk(url).await,
            Network::Ok => self.ok(url).await,
            Network::MoyMir => self.moymir(url).await,
            Network::Twitter | Network::Pocket => Err(CountError::Unsupported(network.to_string())),
        }
    }

    pub async fn vk(&self, url: &str) -> CountResult {
        let body = self.fetch(&self.config.endpoints.vk, url).await?;
        parse_vk(&body)
    }

    pub async fn ok(&self, url: &str) -> CountResult {
        let body = self.fetch(&self.config.endpoints.ok, url).await?;
        parse_ok(&body)
    }

    pub async fn moymir(&self, url: &str) -> CountResult {
        let body = self.fetch(&self.config.endpoints.moymir, url).await?;
        parse_moymir(&body, url)
    }

    /// Facebook share count.
    ///
    /// A failed or empty direct answer escalates to proxied attempts: the
    /// supplier's current proxy first, then a fresh one after every empty,
    /// failed or rate-limited attempt, up to `max_proxy_attempts`.
    pub async fn facebook(&self, url: &str, proxies: &dyn ProxySupplier) -> CountResult {
        let request_url = request_url(&self.config.endpoints.facebook, url);

        let body = match self.get_text(&self.client, &request_url).await {
            Ok(body) if !body.is_empty() => body,
            Ok(_) => {
                debug!("Empty Facebook answer for {}, switching to proxies", url);
                self.facebook_via_proxies(&request_url, url, proxies).await?
            }
            Err(e) => {
                debug!("Direct Facebook request for {} failed ({}), switching to proxies", url, e);
                self.facebook_via_proxies(&request_url, url, proxies).await?
            }
        };

        parse_facebook(&body, url)
    }

    async fn facebook_via_proxies(
        &self,
        request_url: &str,
        url: &str,
        proxies: &dyn ProxySupplier,
    ) -> std::result::Result<String, CountError> {
        let attempts = self.config.max_proxy_attempts;
        let mut proxy = proxies.current().await?;

        for attempt in 1..=attempts {
            let outcome = match self.proxied_client(&proxy, url) {
                Ok(client) => self.get_text(&client, request_url).await,
                Err(e) => Err(e),
            };

            match outcome {
                Ok(body) if body.is_empty() => {
                    warn!("Attempt {}/{} via {}: empty body", attempt, attempts, proxy);
                }
                Ok(body) if self.config.is_rate_limited(&body) => {
                    warn!("Attempt {}/{} via {}: rate limit reached", attempt, attempts, proxy);
                }
                Ok(body) => {
                    debug!("Attempt {}/{} via {} succeeded", attempt, attempts, proxy);
                    return Ok(body);
                }
                Err(e) => {
                    warn!("Attempt {}/{} via {}: {}", attempt, attempts, proxy, e);
                }
            }

            if attempt < attempts {
                proxy = proxies.rotate().await?;
            }
        }

        Err(CountError::RetriesExhausted { attempts })
    }

    /// Client for one proxied attempt, posing as a mobile browser coming from `referer`
    fn proxied_client(&self, proxy: &Proxy, referer: &str) -> std::result::Result<Client, CountError> {
        let mut headers = HeaderMap::new();
        headers.insert("X-Requested-With", HeaderValue::from_static("XMLHttpRequest"));
        headers.insert(USER_AGENT, header_value(&self.config.mobile_user_agent)?);
        headers.insert(REFERER, header_value(referer)?);

        Ok(Client::builder()
            .proxy(proxy.to_reqwest()?)
            .timeout(self.config.proxy_timeout)
            .default_headers(headers)
            .build()?)
    }

    async fn fetch(&self, template: &str, url: &str) -> std::result::Result<String, CountError> {
        let body = self.get_text(&self.client, &request_url(template, url)).await?;
        if body.is_empty() {
            return Err(CountError::EmptyBody);
        }
        Ok(body)
    }

    async fn get_text(&self, client: &Client, request_url: &str) -> std::result::Result<String, CountError> {
        debug!("GET {}", request_url);
        let response = client.get(request_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CountError::Transport(format!("HTTP status: {status}")));
        }
        Ok(response.text().await?)
    }
}

fn request_url(template: &str, url: &str) -> String {
    template.replace(URL_PLACEHOLDER, &encode(url))
}

fn header_value(value: &str) -> std::result::Result<HeaderValue, CountError> {
    HeaderValue::from_str(value).map_err(|e| CountError::Transport(format!("invalid header value: {e}")))
}
