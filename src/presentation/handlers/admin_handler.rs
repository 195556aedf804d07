// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{extract::Extension, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::application::recent_searches::RecentSearches;
use crate::domain::services::search_service::SearchService;

pub async fn get_stats(
    Extension(service): Extension<Arc<SearchService>>,
    Extension(recent): Extension<Arc<RecentSearches>>,
) -> Json<Value> {
    let stats = service.stats().await;

    Json(json!({
        "success": true,
        "total_cached_results": stats.total_cached_results,
        "unique_recent_queries": stats.unique_recent_queries,
        "blocked_domains_count": stats.blocked_domains_count,
        "supported_sources": stats.supported_sources,
        "recent_searches_count": recent.len(),
    }))
}

pub async fn recent_searches(
    Extension(recent): Extension<Arc<RecentSearches>>,
) -> Json<Value> {
    Json(json!({
        "success": true,
        "recent_searches": recent.list(),
    }))
}

pub async fn clear_cache(
    Extension(service): Extension<Arc<SearchService>>,
    Extension(recent): Extension<Arc<RecentSearches>>,
) -> Json<Value> {
    service.clear_cache().await;
    recent.clear();

    Json(json!({
        "success": true,
        "message": "Cache cleared successfully",
    }))
}
