// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One ranked item produced by a source adapter.
///
/// `title`, `url`, `snippet` and `source` are fixed at parse time; only
/// `content` (filled during enrichment) and `relevance_score` (per-source
/// boost applied at parse time) change after construction. `url` is the
/// deduplication key and is kept verbatim as the source reported it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
    pub content: String,
    pub source: String,
    pub relevance_score: f64,
    pub timestamp: DateTime<Utc>,
}

impl SearchResult {
    pub fn new(title: String, url: String, snippet: String, source: &str) -> Self {
        Self {
            title,
            url,
            snippet,
            content: String::new(),
            source: source.to_string(),
            relevance_score: 0.0,
            timestamp: Utc::now(),
        }
    }
}
