// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Deserialize;
use tracing::warn;

use crate::domain::models::search_result::SearchResult;
use crate::domain::services::relevance_scorer::RelevanceScorer;

pub(crate) const LABEL: &str = "hackernews";
pub(crate) const DEFAULT_ENDPOINT: &str = "https://hn.algolia.com/api/v1/search";

/// Fixed additive boost so discussion-backed stories edge out plain web hits
/// at equal lexical relevance.
const SCORE_BOOST: f64 = 0.1;

#[derive(Debug, Deserialize)]
struct StoryHit {
    title: Option<String>,
    url: Option<String>,
    points: Option<i64>,
    num_comments: Option<i64>,
    #[serde(rename = "objectID")]
    object_id: Option<String>,
}

pub(crate) fn request_params(query: &str) -> Vec<(&'static str, String)> {
    vec![
        ("query", query.to_string()),
        ("tags", "story".to_string()),
        ("hitsPerPage", "25".to_string()),
    ]
}

/// Parse the Algolia search response. Items are decoded one by one so a
/// single malformed hit is skipped without dropping the batch.
pub(crate) fn parse(raw: &str, query: &str) -> Vec<SearchResult> {
    let body: serde_json::Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            warn!("Unparseable Hacker News response: {}", e);
            return Vec::new();
        }
    };

    let Some(hits) = body.get("hits").and_then(|h| h.as_array()) else {
        warn!("Hacker News response has no hits array");
        return Vec::new();
    };

    let scorer = RelevanceScorer::new(query);
    let mut results = Vec::new();

    for hit in hits {
        let story: StoryHit = match serde_json::from_value(hit.clone()) {
            Ok(story) => story,
            Err(e) => {
                warn!("Skipping malformed Hacker News hit: {}", e);
                continue;
            }
        };

        let Some(title) = story.title.filter(|t| !t.is_empty()) else {
            continue;
        };

        // Ask posts carry no external link; fall back to the discussion page
        let url = match (story.url, story.object_id) {
            (Some(url), _) if !url.is_empty() => url,
            (_, Some(id)) => format!("https://news.ycombinator.com/item?id={}", id),
            _ => continue,
        };

        let snippet = format!(
            "score: {}, comments: {}",
            story.points.unwrap_or(0),
            story.num_comments.unwrap_or(0)
        );

        let mut result = SearchResult::new(title.clone(), url, snippet.clone(), LABEL);
        result.relevance_score = scorer.score(&title, &snippet) + SCORE_BOOST;
        results.push(result);
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "hits": [
            {
                "title": "Show HN: Fast web scraping in Rust",
                "url": "https://example.com/show",
                "points": 212,
                "num_comments": 87,
                "objectID": "1001"
            },
            {
                "title": "Ask HN: How do you test scrapers?",
                "url": null,
                "points": 45,
                "num_comments": 30,
                "objectID": "1002"
            },
            {
                "title": null,
                "url": "https://example.com/comment",
                "objectID": "1003"
            },
            {
                "title": "Broken hit",
                "points": "not a number",
                "objectID": "1004"
            }
        ]
    }"#;

    #[test]
    fn test_parse_builds_synthetic_snippets() {
        let results = parse(FIXTURE, "web scraping");

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].snippet, "score: 212, comments: 87");
        assert_eq!(
            results[1].url,
            "https://news.ycombinator.com/item?id=1002"
        );
        assert!(results.iter().all(|r| r.source == "hackernews"));
    }

    #[test]
    fn test_parse_applies_fixed_boost() {
        let results = parse(FIXTURE, "web scraping");
        // both query words in the title: 0.7 base plus the source boost
        assert!((results[0].relevance_score - (0.7 + SCORE_BOOST)).abs() < 1e-9);
    }

    #[test]
    fn test_parse_non_json_yields_empty() {
        assert!(parse("<html>definitely not json</html>", "query").is_empty());
        assert!(parse("{\"hits\": 42}", "query").is_empty());
    }
}
