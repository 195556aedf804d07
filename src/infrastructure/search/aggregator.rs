// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use futures::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::models::search_result::SearchResult;
use crate::infrastructure::fetch::Fetcher;
use crate::infrastructure::search::registry::SourceConfig;
use crate::utils::html_text;

const DEFAULT_ENRICH_TOP: usize = 5;
const CONTENT_MAX_CHARS: usize = 5000;

/// Fans a query out to every configured source concurrently, merges the
/// contributions, deduplicates by URL and ranks by relevance.
///
/// A source that fails to fetch or parse contributes nothing; it never stops
/// its siblings. Contributions are merged in registry order (the fan-in
/// preserves it), so the keep-first dedup winner is pinned to source
/// priority, not task completion order.
pub struct SearchAggregator {
    registry: Vec<SourceConfig>,
    fetcher: Arc<Fetcher>,
    enrich_top: usize,
}

impl SearchAggregator {
    pub fn new(registry: Vec<SourceConfig>, fetcher: Arc<Fetcher>) -> Self {
        Self {
            registry,
            fetcher,
            enrich_top: DEFAULT_ENRICH_TOP,
        }
    }

    /// How many of the top-ranked results get a full-page content fetch.
    /// Zero disables enrichment.
    pub fn with_enrich_top(mut self, enrich_top: usize) -> Self {
        self.enrich_top = enrich_top;
        self
    }

    pub fn source_labels(&self) -> Vec<&'static str> {
        self.registry.iter().map(|s| s.label()).collect()
    }

    pub fn source_count(&self) -> usize {
        self.registry.len()
    }

    pub fn blocked_domain_count(&self) -> usize {
        self.fetcher.blocked_domain_count()
    }

    pub async fn aggregate(&self, query: &str, max_results: usize) -> Vec<SearchResult> {
        let fetches = self.registry.iter().map(|source| {
            let fetcher = self.fetcher.clone();
            let query = query.to_string();
            let source = source.clone();

            async move {
                let request = source.build_request(&query);
                match fetcher.fetch(&request.endpoint, &request.params).await {
                    Ok(body) => {
                        let results = source.parse(&body, &query);
                        info!("Source {} returned {} results", source.label(), results.len());
                        results
                    }
                    Err(e) => {
                        warn!("Source {} contributed nothing: {}", source.label(), e);
                        Vec::new()
                    }
                }
            }
        });

        let pool: Vec<SearchResult> = join_all(fetches).await.into_iter().flatten().collect();

        let mut unique = dedup_by_url(pool);
        unique.sort_by(|a, b| {
            b.relevance_score
                .partial_cmp(&a.relevance_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        unique.truncate(max_results);

        self.enrich(&mut unique).await;
        unique
    }

    /// Deep-fetch page content for the top of the already-ranked, truncated
    /// list. Runs after ranking so it can never widen the candidate pool; a
    /// failed enrichment leaves that record's content empty.
    async fn enrich(&self, results: &mut [SearchResult]) {
        let top = results.len().min(self.enrich_top);
        if top == 0 {
            return;
        }

        let fetches = results[..top].iter().map(|result| {
            let fetcher = self.fetcher.clone();
            let url = result.url.clone();
            async move { fetcher.fetch(&url, &[]).await.ok() }
        });

        let bodies = join_all(fetches).await;
        for (result, body) in results[..top].iter_mut().zip(bodies) {
            if let Some(html) = body {
                result.content = html_text::extract_text(&html, CONTENT_MAX_CHARS);
            }
        }
    }
}

/// Keep the first record seen for each exact URL.
fn dedup_by_url(results: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut seen = HashSet::new();
    results
        .into_iter()
        .filter(|result| seen.insert(result.url.clone()))
        .collect()
}
