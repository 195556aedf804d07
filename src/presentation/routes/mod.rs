// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::application::recent_searches::RecentSearches;
use crate::domain::services::search_service::SearchService;
use crate::presentation::handlers::{admin_handler, export_handler, search_handler};

/// Build the application router.
pub fn routes(service: Arc<SearchService>, recent: Arc<RecentSearches>) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let api_routes = Router::new()
        .route("/v1/search", post(search_handler::search))
        .route("/v1/export", post(export_handler::export))
        .route("/v1/stats", get(admin_handler::get_stats))
        .route("/v1/recent", get(admin_handler::recent_searches))
        .route("/v1/clear-cache", post(admin_handler::clear_cache));

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(Extension(service))
        .layer(Extension(recent))
        .layer(TraceLayer::new_for_http())
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

/// Version information endpoint
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
