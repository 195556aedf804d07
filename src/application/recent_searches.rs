// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::VecDeque;

const DEFAULT_CAPACITY: usize = 50;

#[derive(Debug, Clone, Serialize)]
pub struct RecentSearch {
    pub query: String,
    pub results_count: usize,
    pub timestamp: DateTime<Utc>,
}

/// Bounded, newest-first ring of recently served queries.
pub struct RecentSearches {
    entries: RwLock<VecDeque<RecentSearch>>,
    capacity: usize,
}

impl Default for RecentSearches {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl RecentSearches {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    pub fn record(&self, query: &str, results_count: usize) {
        let mut entries = self.entries.write();
        entries.push_front(RecentSearch {
            query: query.to_string(),
            results_count,
            timestamp: Utc::now(),
        });
        entries.truncate(self.capacity);
    }

    pub fn list(&self) -> Vec<RecentSearch> {
        self.entries.read().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }
}
