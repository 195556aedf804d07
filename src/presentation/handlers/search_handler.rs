// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{extract::Extension, Json};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::application::dto::search_request::{
    SearchRequestDto, SearchResponseDto, SearchResultDto,
};
use crate::application::recent_searches::RecentSearches;
use crate::domain::services::search_service::SearchService;
use crate::presentation::errors::AppError;

const DEFAULT_MAX_RESULTS: usize = 20;

/// Handle a search request.
///
/// Validation errors and an empty query map to 400; partial upstream failure
/// is not an error and simply returns fewer results.
pub async fn search(
    Extension(service): Extension<Arc<SearchService>>,
    Extension(recent): Extension<Arc<RecentSearches>>,
    Json(payload): Json<SearchRequestDto>,
) -> Result<Json<SearchResponseDto>, AppError> {
    payload
        .validate()
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let max_results = payload.max_results.unwrap_or(DEFAULT_MAX_RESULTS);
    let use_cache = payload.use_cache.unwrap_or(true);

    info!(
        "Search request: '{}' (max_results: {})",
        payload.query, max_results
    );

    let results = service
        .search(&payload.query, max_results, use_cache)
        .await?;

    recent.record(payload.query.trim(), results.len());

    Ok(Json(SearchResponseDto {
        success: true,
        results_count: results.len(),
        results: results.iter().map(SearchResultDto::from).collect(),
        query: payload.query,
        search_time: Utc::now(),
    }))
}
