// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// Application module
///
/// DTOs, export serialization and request-scoped state shared with the
/// HTTP surface
pub mod application;

/// Configuration module
///
/// Handles application settings and environment variables
pub mod config;

/// Domain module
///
/// Core entities and services: result records, relevance scoring and the
/// search orchestrator
pub mod domain;

/// Infrastructure module
///
/// Outbound fetching, source integrations, aggregation and the result cache
pub mod infrastructure;

/// Presentation module
///
/// HTTP handlers, routes and error mapping
pub mod presentation;

/// Utilities module
///
/// Retry policy, robots.txt gate, HTML text extraction and telemetry
pub mod utils;
