// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::models::search_result::SearchResult;

/// Content is shortened for transport; the full text stays in the cache.
const RESPONSE_CONTENT_MAX_CHARS: usize = 1000;

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct SearchRequestDto {
    #[validate(length(min = 1, message = "Query cannot be empty"))]
    pub query: String,
    #[validate(range(min = 1, max = 100))]
    pub max_results: Option<usize>,
    pub use_cache: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponseDto {
    pub success: bool,
    pub query: String,
    pub results_count: usize,
    pub results: Vec<SearchResultDto>,
    pub search_time: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResultDto {
    pub title: String,
    pub url: String,
    pub snippet: String,
    pub content: String,
    pub source: String,
    pub relevance_score: f64,
    pub timestamp: DateTime<Utc>,
}

impl From<&SearchResult> for SearchResultDto {
    fn from(result: &SearchResult) -> Self {
        Self {
            title: result.title.clone(),
            url: result.url.clone(),
            snippet: result.snippet.clone(),
            content: result.content.chars().take(RESPONSE_CONTENT_MAX_CHARS).collect(),
            source: result.source.clone(),
            relevance_score: (result.relevance_score * 1000.0).round() / 1000.0,
            timestamp: result.timestamp,
        }
    }
}

impl From<SearchResultDto> for SearchResult {
    fn from(dto: SearchResultDto) -> Self {
        Self {
            title: dto.title,
            url: dto.url,
            snippet: dto.snippet,
            content: dto.content,
            source: dto.source,
            relevance_score: dto.relevance_score,
            timestamp: dto.timestamp,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ExportRequestDto {
    #[validate(length(min = 1, message = "Format cannot be empty"))]
    pub format: String,
    pub results: Vec<SearchResultDto>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_dto_truncates_content_and_rounds_score() {
        let mut result = SearchResult::new(
            "Title".to_string(),
            "https://example.com".to_string(),
            "snippet".to_string(),
            "bing",
        );
        result.content = "x".repeat(5000);
        result.relevance_score = 0.123456;

        let dto = SearchResultDto::from(&result);
        assert_eq!(dto.content.len(), RESPONSE_CONTENT_MAX_CHARS);
        assert!((dto.relevance_score - 0.123).abs() < 1e-9);
    }
}
