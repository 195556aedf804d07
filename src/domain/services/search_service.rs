// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::counter;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::domain::models::search_result::SearchResult;
use crate::infrastructure::cache::SearchCache;
use crate::infrastructure::search::SearchAggregator;

#[derive(Debug, Error, PartialEq)]
pub enum SearchError {
    #[error("Search query cannot be empty")]
    InvalidQuery,
    #[error("No search sources configured")]
    NoSourcesConfigured,
}

#[derive(Debug, Serialize)]
pub struct EngineStats {
    pub total_cached_results: u64,
    pub unique_recent_queries: u64,
    pub blocked_domains_count: u64,
    pub supported_sources: Vec<String>,
}

/// Search entry point: cache consultation, aggregation, write-through.
///
/// Partial upstream failure is invisible to the caller; the only hard
/// failures are an empty query and an engine constructed without sources.
pub struct SearchService {
    aggregator: SearchAggregator,
    cache: SearchCache,
}

impl SearchService {
    pub fn new(aggregator: SearchAggregator, cache: SearchCache) -> Self {
        Self { aggregator, cache }
    }

    pub async fn search(
        &self,
        query: &str,
        max_results: usize,
        use_cache: bool,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::InvalidQuery);
        }
        if self.aggregator.source_count() == 0 {
            return Err(SearchError::NoSourcesConfigured);
        }

        let max_results = max_results.max(1);
        counter!("searches_total").increment(1);

        if use_cache {
            if let Some(mut cached) = self.cache.get(query).await {
                cached.truncate(max_results);
                return Ok(cached);
            }
        }

        let results = self.aggregator.aggregate(query, max_results).await;
        if !results.is_empty() {
            self.cache.put(query, &results).await;
        }

        info!("Search completed: {} results for '{}'", results.len(), query);
        Ok(results)
    }

    pub async fn stats(&self) -> EngineStats {
        let store = self.cache.stats().await;
        EngineStats {
            total_cached_results: store.total_rows,
            unique_recent_queries: store.distinct_recent_queries,
            blocked_domains_count: self.aggregator.blocked_domain_count() as u64,
            supported_sources: self
                .aggregator
                .source_labels()
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }

    pub async fn clear_cache(&self) {
        self.cache.clear().await;
        info!("Search cache cleared");
    }
}
