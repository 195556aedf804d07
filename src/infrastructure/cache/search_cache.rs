// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{Duration, Utc};
use metrics::counter;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::models::search_result::SearchResult;
use crate::infrastructure::cache::store::{CacheRow, CacheStore, StoreStats};

/// Query-keyed result cache with lazy expiry.
///
/// Keys are the SHA-256 of the exact query string. An entry is a hit only
/// while its insertion timestamp is inside the freshness window; stale rows
/// are ignored on read and left in place until an administrative clear.
/// Store failures never fail a search: a read error is a forced miss, a
/// write error is logged and swallowed.
pub struct SearchCache {
    store: Arc<dyn CacheStore>,
    freshness_window: Duration,
}

impl SearchCache {
    pub fn new(store: Arc<dyn CacheStore>, freshness_window: Duration) -> Self {
        Self {
            store,
            freshness_window,
        }
    }

    pub fn query_hash(query: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(query.as_bytes());
        hex::encode(hasher.finalize())
    }

    pub async fn get(&self, query: &str) -> Option<Vec<SearchResult>> {
        let hash = Self::query_hash(query);
        let rows = match self.store.rows_for(&hash).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Cache read failed for query '{}': {}", query, e);
                counter!("cache_misses_total").increment(1);
                return None;
            }
        };

        let cutoff = Utc::now() - self.freshness_window;
        let mut fresh: Vec<SearchResult> = rows
            .into_iter()
            .filter(|row| row.cached_at > cutoff)
            .map(|row| row.result)
            .collect();

        if fresh.is_empty() {
            counter!("cache_misses_total").increment(1);
            return None;
        }

        fresh.sort_by(|a, b| {
            b.relevance_score
                .partial_cmp(&a.relevance_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        counter!("cache_hits_total").increment(1);
        debug!("Cache hit for query '{}' ({} rows)", query, fresh.len());
        Some(fresh)
    }

    /// Write-through after a successful aggregation. Empty result sets are
    /// never cached so failed or degenerate searches stay retryable.
    pub async fn put(&self, query: &str, results: &[SearchResult]) {
        if results.is_empty() {
            return;
        }

        let hash = Self::query_hash(query);
        let cached_at = Utc::now();

        for result in results {
            let row = CacheRow {
                query_hash: hash.clone(),
                result: result.clone(),
                cached_at,
            };
            if let Err(e) = self.store.upsert(row).await {
                warn!("Cache write failed for query '{}': {}", query, e);
                return;
            }
        }
        debug!("Cached {} results for query '{}'", results.len(), query);
    }

    pub async fn clear(&self) {
        if let Err(e) = self.store.clear_all().await {
            warn!("Cache clear failed: {}", e);
        }
    }

    pub async fn stats(&self) -> StoreStats {
        match self.store.stats().await {
            Ok(stats) => stats,
            Err(e) => {
                warn!("Cache stats unavailable: {}", e);
                StoreStats::default()
            }
        }
    }
}
