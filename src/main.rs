// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;

use metasearch::application::recent_searches::RecentSearches;
use metasearch::config::settings::Settings;
use metasearch::domain::services::search_service::SearchService;
use metasearch::infrastructure::cache::{MemoryStore, SearchCache};
use metasearch::infrastructure::fetch::{Fetcher, FetcherConfig};
use metasearch::infrastructure::search::{default_registry, registry_from_names, SearchAggregator};
use metasearch::presentation::routes;
use metasearch::utils::retry_policy::RetryPolicy;
use metasearch::utils::telemetry;

/// Application entry point: wires settings, cache, fetcher and sources into
/// one explicitly constructed engine, then serves the HTTP surface.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging and metrics
    telemetry::init_telemetry();
    info!("Starting metasearch...");
    metasearch::infrastructure::metrics::init_metrics();

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    // 3. Build the engine
    let fetcher = Arc::new(Fetcher::new(FetcherConfig {
        request_timeout: Duration::from_secs(settings.fetch.timeout_secs),
        max_retries: settings.fetch.max_retries,
        delay_range_ms: (settings.fetch.delay_min_ms, settings.fetch.delay_max_ms),
        respect_robots: settings.fetch.respect_robots,
        retry_policy: RetryPolicy::default(),
    }));

    let registry = match &settings.search.sources {
        Some(names) => registry_from_names(names),
        None => default_registry(),
    };
    anyhow::ensure!(!registry.is_empty(), "no valid search sources configured");

    let labels: Vec<&str> = registry.iter().map(|s| s.label()).collect();
    info!("Configured sources: {}", labels.join(", "));

    let aggregator = SearchAggregator::new(registry, fetcher)
        .with_enrich_top(settings.search.enrich_top);
    let cache = SearchCache::new(
        Arc::new(MemoryStore::new()),
        chrono::Duration::seconds(settings.cache.freshness_secs),
    );

    let service = Arc::new(SearchService::new(aggregator, cache));
    let recent = Arc::new(RecentSearches::default());

    // 4. Start HTTP server
    let app = routes::routes(service, recent);
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}
