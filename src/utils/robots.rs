// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use dashmap::DashMap;
use robotstxt::DefaultMatcher;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use url::Url;

const ROBOTS_FETCH_TIMEOUT: Duration = Duration::from_secs(5);
const ROBOTS_CACHE_TTL: Duration = Duration::from_secs(3600);

#[derive(Clone)]
struct CachedRobots {
    content: String,
    expires_at: Instant,
}

/// Per-host robots.txt gate with an in-memory TTL cache.
///
/// An unavailable or unparseable robots.txt allows the fetch: the gate only
/// ever vetoes on an explicit disallow rule.
pub struct RobotsGate {
    client: reqwest::Client,
    cache: DashMap<String, CachedRobots>,
}

impl Default for RobotsGate {
    fn default() -> Self {
        Self::new()
    }
}

impl RobotsGate {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(ROBOTS_FETCH_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            client,
            cache: DashMap::new(),
        }
    }

    pub async fn is_allowed(&self, url_str: &str, user_agent: &str) -> bool {
        let Ok(url) = Url::parse(url_str) else {
            return true;
        };
        let Ok(robots_url) = url.join("/robots.txt") else {
            return true;
        };

        let content = self.robots_content(robots_url.as_str()).await;
        if content.is_empty() {
            return true;
        }

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&content, user_agent, url_str)
    }

    async fn robots_content(&self, robots_url: &str) -> String {
        if let Some(cached) = self.cache.get(robots_url) {
            if cached.expires_at > Instant::now() {
                return cached.content.clone();
            }
        }

        let content = match self.client.get(robots_url).send().await {
            Ok(response) if response.status().is_success() => {
                response.text().await.unwrap_or_default()
            }
            Ok(response) => {
                debug!("robots.txt at {} returned {}", robots_url, response.status());
                String::new()
            }
            Err(e) => {
                warn!("Could not fetch robots.txt from {}: {}", robots_url, e);
                String::new()
            }
        };

        self.cache.insert(
            robots_url.to_string(),
            CachedRobots {
                content: content.clone(),
                expires_at: Instant::now() + ROBOTS_CACHE_TTL,
            },
        );

        content
    }
}
