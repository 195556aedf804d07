// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Deserialize;
use tracing::warn;

use crate::domain::models::search_result::SearchResult;
use crate::domain::services::relevance_scorer::RelevanceScorer;

pub(crate) const LABEL: &str = "reddit";
pub(crate) const DEFAULT_ENDPOINT: &str = "https://www.reddit.com/search.json";

/// Fixed additive boost, half the Hacker News one.
const SCORE_BOOST: f64 = 0.05;

const SNIPPET_MAX_CHARS: usize = 200;

#[derive(Debug, Deserialize)]
struct Post {
    title: String,
    permalink: String,
    #[serde(default)]
    selftext: String,
    subreddit: Option<String>,
    score: Option<i64>,
}

pub(crate) fn request_params(query: &str) -> Vec<(&'static str, String)> {
    vec![
        ("q", query.to_string()),
        ("limit", "25".to_string()),
        ("sort", "relevance".to_string()),
    ]
}

/// Parse the public listing response (`data.children[].data`). Children are
/// decoded one by one; a malformed child is skipped, not fatal.
pub(crate) fn parse(raw: &str, query: &str) -> Vec<SearchResult> {
    let body: serde_json::Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            warn!("Unparseable Reddit response: {}", e);
            return Vec::new();
        }
    };

    let Some(children) = body
        .get("data")
        .and_then(|d| d.get("children"))
        .and_then(|c| c.as_array())
    else {
        warn!("Reddit response has no listing children");
        return Vec::new();
    };

    let scorer = RelevanceScorer::new(query);
    let mut results = Vec::new();

    for child in children {
        let Some(data) = child.get("data") else {
            continue;
        };
        let post: Post = match serde_json::from_value(data.clone()) {
            Ok(post) => post,
            Err(e) => {
                warn!("Skipping malformed Reddit post: {}", e);
                continue;
            }
        };

        if post.title.is_empty() || post.permalink.is_empty() {
            continue;
        }

        let url = format!("https://www.reddit.com{}", post.permalink);
        let snippet = if post.selftext.trim().is_empty() {
            format!(
                "r/{}, score: {}",
                post.subreddit.as_deref().unwrap_or("unknown"),
                post.score.unwrap_or(0)
            )
        } else {
            post.selftext.chars().take(SNIPPET_MAX_CHARS).collect()
        };

        let mut result = SearchResult::new(post.title.clone(), url, snippet.clone(), LABEL);
        result.relevance_score = scorer.score(&post.title, &snippet) + SCORE_BOOST;
        results.push(result);
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "data": {
            "children": [
                {
                    "data": {
                        "title": "Scraping reddit with rust",
                        "permalink": "/r/rust/comments/abc/scraping_reddit/",
                        "selftext": "I built a small scraper using reqwest and tokio.",
                        "subreddit": "rust",
                        "score": 321
                    }
                },
                {
                    "data": {
                        "title": "Link post without body",
                        "permalink": "/r/programming/comments/def/link_post/",
                        "selftext": "",
                        "subreddit": "programming",
                        "score": 12
                    }
                },
                {
                    "data": {
                        "title": 42,
                        "permalink": "/broken/"
                    }
                }
            ]
        }
    }"#;

    #[test]
    fn test_parse_builds_urls_and_snippets() {
        let results = parse(FIXTURE, "rust scraping");

        assert_eq!(results.len(), 2);
        assert_eq!(
            results[0].url,
            "https://www.reddit.com/r/rust/comments/abc/scraping_reddit/"
        );
        assert_eq!(
            results[0].snippet,
            "I built a small scraper using reqwest and tokio."
        );
        assert_eq!(results[1].snippet, "r/programming, score: 12");
    }

    #[test]
    fn test_parse_applies_fixed_boost() {
        let results = parse(FIXTURE, "rust scraping");
        // both query words in the first title, none in its snippet
        assert!((results[0].relevance_score - (0.7 + SCORE_BOOST)).abs() < 1e-9);
    }

    #[test]
    fn test_parse_empty_listing() {
        assert!(parse(r#"{"data": {"children": []}}"#, "query").is_empty());
        assert!(parse("[]", "query").is_empty());
    }
}
