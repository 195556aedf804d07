// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use dashmap::DashSet;
use metrics::counter;
use rand::random_range;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

use crate::utils::retry_policy::RetryPolicy;
use crate::utils::robots::RobotsGate;

/// Browser-plausible user agents, rotated per attempt.
static USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
];

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid request url: {0}")]
    InvalidUrl(String),
    #[error("robots.txt disallows fetching {0}")]
    RobotsDisallowed(String),
    #[error("giving up on {url} after {attempts} attempts")]
    RetriesExhausted { url: String, attempts: u32 },
}

/// Fetcher behaviour knobs. Delay and timeout defaults mirror typical
/// polite-scraping settings; tests shrink them to milliseconds.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub request_timeout: Duration,
    pub max_retries: u32,
    /// Uniform random pre-request delay, inclusive bounds in milliseconds
    pub delay_range_ms: (u64, u64),
    pub respect_robots: bool,
    pub retry_policy: RetryPolicy,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            max_retries: 3,
            delay_range_ms: (1000, 3000),
            respect_robots: true,
            retry_policy: RetryPolicy::default(),
        }
    }
}

/// Outbound HTTP fetcher with user-agent rotation, jittered throttling and
/// bounded retries.
///
/// A request that exhausts its retry budget resolves to [`FetchError`] rather
/// than panicking or propagating transport errors; the failing host is
/// recorded in the advisory blocked-domain set. The set is never consulted
/// before a request, it only feeds stats.
pub struct Fetcher {
    client: reqwest::Client,
    config: FetcherConfig,
    robots: RobotsGate,
    blocked_domains: Arc<DashSet<String>>,
}

impl Fetcher {
    pub fn new(config: FetcherConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config,
            robots: RobotsGate::new(),
            blocked_domains: Arc::new(DashSet::new()),
        }
    }

    pub fn blocked_domain_count(&self) -> usize {
        self.blocked_domains.len()
    }

    /// Fetch `endpoint` with the given query parameters and return the body.
    ///
    /// Retries up to the configured budget. HTTP 429 backs off exponentially
    /// before the next attempt; other non-200 statuses, timeouts and
    /// transport errors retry after the normal jitter delay only.
    pub async fn fetch(&self, endpoint: &str, params: &[(&str, String)]) -> Result<String, FetchError> {
        let url = build_url(endpoint, params)?;
        let user_agent = USER_AGENTS[random_range(0..USER_AGENTS.len())];

        if self.config.respect_robots && !self.robots.is_allowed(&url, user_agent).await {
            warn!("Robots.txt disallows fetching {}", url);
            return Err(FetchError::RobotsDisallowed(url));
        }

        for attempt in 0..self.config.max_retries {
            self.throttle().await;
            counter!("fetch_requests_total").increment(1);

            let request = self
                .client
                .get(&url)
                .header("User-Agent", USER_AGENTS[random_range(0..USER_AGENTS.len())])
                .header(
                    "Accept",
                    "text/html,application/xhtml+xml,application/xml;q=0.9,application/json;q=0.9,*/*;q=0.8",
                )
                .header("Accept-Language", "en-US,en;q=0.5")
                .header("Connection", "keep-alive")
                .header("Upgrade-Insecure-Requests", "1");

            match tokio::time::timeout(self.config.request_timeout, request.send()).await {
                Ok(Ok(response)) => {
                    let status = response.status();
                    if status.is_success() {
                        match response.text().await {
                            Ok(body) => {
                                debug!("Successfully fetched {}", url);
                                return Ok(body);
                            }
                            Err(e) => {
                                warn!("Failed to read body from {}: {} (attempt {})", url, e, attempt + 1);
                            }
                        }
                    } else if status.as_u16() == 429 {
                        let backoff = self.config.retry_policy.calculate_backoff(attempt + 1);
                        counter!("fetch_rate_limited_total").increment(1);
                        warn!("Rate limited by {}. Backing off {:?}", url, backoff);
                        tokio::time::sleep(backoff).await;
                    } else {
                        warn!("HTTP {} from {} (attempt {})", status, url, attempt + 1);
                    }
                }
                Ok(Err(e)) => {
                    warn!("Transport error for {}: {} (attempt {})", url, e, attempt + 1);
                }
                Err(_) => {
                    warn!("Timeout for {} (attempt {})", url, attempt + 1);
                }
            }
        }

        if let Some(host) = Url::parse(&url).ok().and_then(|u| u.host_str().map(String::from)) {
            self.blocked_domains.insert(host);
        }
        counter!("fetch_failures_total").increment(1);
        info!("Failed to fetch {} after {} attempts", url, self.config.max_retries);

        Err(FetchError::RetriesExhausted {
            url,
            attempts: self.config.max_retries,
        })
    }

    async fn throttle(&self) {
        let (min_ms, max_ms) = self.config.delay_range_ms;
        if max_ms == 0 {
            return;
        }
        let delay = random_range(min_ms..=max_ms.max(min_ms));
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
}

fn build_url(endpoint: &str, params: &[(&str, String)]) -> Result<String, FetchError> {
    Url::parse(endpoint).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", endpoint, e)))?;

    if params.is_empty() {
        return Ok(endpoint.to_string());
    }

    let query = serde_urlencoded::to_string(params)
        .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", endpoint, e)))?;
    Ok(format!("{}?{}", endpoint, query))
}
