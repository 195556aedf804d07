// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Application configuration.
///
/// Layered: built-in defaults, then optional `config/default` and
/// `config/{APP_ENVIRONMENT}` files, then `METASEARCH__`-prefixed
/// environment variables.
#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub search: SearchSettings,
    pub fetch: FetchSettings,
    pub cache: CacheSettings,
}

#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct SearchSettings {
    /// Result count when a request does not specify one
    pub default_max_results: usize,
    /// How many top-ranked results get full-page content enrichment
    pub enrich_top: usize,
    /// Source names in priority order; unset means all supported sources
    pub sources: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct FetchSettings {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Attempts per outbound request
    pub max_retries: u32,
    /// Pre-request jitter delay bounds in milliseconds
    pub delay_min_ms: u64,
    pub delay_max_ms: u64,
    /// Whether to consult robots.txt before fetching
    pub respect_robots: bool,
}

#[derive(Debug, Deserialize)]
pub struct CacheSettings {
    /// Freshness window in seconds; older entries are treated as misses
    pub freshness_secs: i64,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("search.default_max_results", 20)?
            .set_default("search.enrich_top", 5)?
            .set_default("fetch.timeout_secs", 30)?
            .set_default("fetch.max_retries", 3)?
            .set_default("fetch.delay_min_ms", 1000)?
            .set_default("fetch.delay_max_ms", 3000)?
            .set_default("fetch.respect_robots", true)?
            .set_default("cache.freshness_secs", 3600)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("METASEARCH").separator("__"));

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
