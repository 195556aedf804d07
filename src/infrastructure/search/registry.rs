// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use tracing::warn;

use crate::domain::models::search_result::SearchResult;
use crate::infrastructure::search::{bing, duckduckgo, hacker_news, reddit, yahoo};

/// Closed set of supported result sources. Dispatch is by `match`, so adding
/// a source means adding a variant and its module; there is no dynamic
/// lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    DuckDuckGo,
    Bing,
    Yahoo,
    HackerNews,
    Reddit,
}

impl SourceKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::DuckDuckGo => duckduckgo::LABEL,
            Self::Bing => bing::LABEL,
            Self::Yahoo => yahoo::LABEL,
            Self::HackerNews => hacker_news::LABEL,
            Self::Reddit => reddit::LABEL,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "duckduckgo" | "ddg" => Some(Self::DuckDuckGo),
            "bing" => Some(Self::Bing),
            "yahoo" => Some(Self::Yahoo),
            "hackernews" | "hacker_news" | "hn" => Some(Self::HackerNews),
            "reddit" => Some(Self::Reddit),
            _ => None,
        }
    }

    fn default_endpoint(&self) -> &'static str {
        match self {
            Self::DuckDuckGo => duckduckgo::DEFAULT_ENDPOINT,
            Self::Bing => bing::DEFAULT_ENDPOINT,
            Self::Yahoo => yahoo::DEFAULT_ENDPOINT,
            Self::HackerNews => hacker_news::DEFAULT_ENDPOINT,
            Self::Reddit => reddit::DEFAULT_ENDPOINT,
        }
    }
}

/// A ready-to-send request: endpoint plus unencoded query parameters.
#[derive(Debug, Clone)]
pub struct SourceRequest {
    pub endpoint: String,
    pub params: Vec<(&'static str, String)>,
}

/// Static per-source configuration, built once at engine startup and shared
/// read-only across concurrent fetch tasks.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    kind: SourceKind,
    endpoint: String,
}

impl SourceConfig {
    pub fn new(kind: SourceKind) -> Self {
        Self {
            kind,
            endpoint: kind.default_endpoint().to_string(),
        }
    }

    /// Override the endpoint, e.g. to point a source at a mock server.
    pub fn with_endpoint(kind: SourceKind, endpoint: impl Into<String>) -> Self {
        Self {
            kind,
            endpoint: endpoint.into(),
        }
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    pub fn label(&self) -> &'static str {
        self.kind.label()
    }

    pub fn build_request(&self, query: &str) -> SourceRequest {
        let params = match self.kind {
            SourceKind::DuckDuckGo => duckduckgo::request_params(query),
            SourceKind::Bing => bing::request_params(query),
            SourceKind::Yahoo => yahoo::request_params(query),
            SourceKind::HackerNews => hacker_news::request_params(query),
            SourceKind::Reddit => reddit::request_params(query),
        };
        SourceRequest {
            endpoint: self.endpoint.clone(),
            params,
        }
    }

    /// Parse a raw response body into result records. Never errors across
    /// this boundary: a response the adapter cannot make sense of is an
    /// empty contribution.
    pub fn parse(&self, raw: &str, query: &str) -> Vec<SearchResult> {
        match self.kind {
            SourceKind::DuckDuckGo => duckduckgo::parse(raw, query),
            SourceKind::Bing => bing::parse(raw, query),
            SourceKind::Yahoo => yahoo::parse(raw, query),
            SourceKind::HackerNews => hacker_news::parse(raw, query),
            SourceKind::Reddit => reddit::parse(raw, query),
        }
    }
}

/// All supported sources in priority order. The order is load-bearing: the
/// aggregator merges contributions in registry order, which pins the
/// deduplication keep-first winner to the earlier source.
pub fn default_registry() -> Vec<SourceConfig> {
    vec![
        SourceConfig::new(SourceKind::DuckDuckGo),
        SourceConfig::new(SourceKind::Bing),
        SourceConfig::new(SourceKind::Yahoo),
        SourceConfig::new(SourceKind::HackerNews),
        SourceConfig::new(SourceKind::Reddit),
    ]
}

/// Build a registry from configured source names, preserving the given
/// order. Unknown names are logged and skipped.
pub fn registry_from_names(names: &[String]) -> Vec<SourceConfig> {
    names
        .iter()
        .filter_map(|name| match SourceKind::from_name(name) {
            Some(kind) => Some(SourceConfig::new(kind)),
            None => {
                warn!("Ignoring unknown search source '{}'", name);
                None
            }
        })
        .collect()
}
