// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::domain::models::search_result::SearchResult;

/// One persisted result row. Rows are keyed by (query_hash, url): writing a
/// row for an existing pair replaces it, other rows under the same hash are
/// left untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheRow {
    pub query_hash: String,
    pub result: SearchResult,
    pub cached_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct StoreStats {
    pub total_rows: u64,
    pub distinct_recent_queries: u64,
}

/// Persistence boundary for cached search results.
///
/// Implementations only need key-value semantics with per-key atomicity;
/// expiry is enforced by the caller, not the store.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn rows_for(&self, query_hash: &str) -> Result<Vec<CacheRow>>;
    async fn upsert(&self, row: CacheRow) -> Result<()>;
    async fn clear_all(&self) -> Result<()>;
    async fn stats(&self) -> Result<StoreStats>;
}

/// In-process store backed by a concurrent map. Entry operations are atomic
/// per key; there is no lock across unrelated keys.
pub struct MemoryStore {
    rows: DashMap<String, Vec<CacheRow>>,
    recent_window: Duration,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_recent_window(Duration::hours(24))
    }

    /// `recent_window` bounds the "distinct recent queries" stat.
    pub fn with_recent_window(recent_window: Duration) -> Self {
        Self {
            rows: DashMap::new(),
            recent_window,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn rows_for(&self, query_hash: &str) -> Result<Vec<CacheRow>> {
        Ok(self
            .rows
            .get(query_hash)
            .map(|entry| entry.clone())
            .unwrap_or_default())
    }

    async fn upsert(&self, row: CacheRow) -> Result<()> {
        let mut entry = self.rows.entry(row.query_hash.clone()).or_default();
        match entry.iter().position(|r| r.result.url == row.result.url) {
            Some(i) => entry[i] = row,
            None => entry.push(row),
        }
        Ok(())
    }

    async fn clear_all(&self) -> Result<()> {
        self.rows.clear();
        Ok(())
    }

    async fn stats(&self) -> Result<StoreStats> {
        let cutoff = Utc::now() - self.recent_window;
        let mut total_rows = 0u64;
        let mut distinct_recent_queries = 0u64;

        for entry in self.rows.iter() {
            total_rows += entry.value().len() as u64;
            if entry.value().iter().any(|row| row.cached_at > cutoff) {
                distinct_recent_queries += 1;
            }
        }

        Ok(StoreStats {
            total_rows,
            distinct_recent_queries,
        })
    }
}
