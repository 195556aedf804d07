// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use scraper::{Html, Selector};
use tracing::warn;
use url::Url;

use crate::domain::models::search_result::SearchResult;
use crate::domain::services::relevance_scorer::RelevanceScorer;

pub(crate) const LABEL: &str = "duckduckgo";
pub(crate) const DEFAULT_ENDPOINT: &str = "https://html.duckduckgo.com/html/";

pub(crate) fn request_params(query: &str) -> Vec<(&'static str, String)> {
    vec![("q", query.to_string())]
}

/// Parse the DuckDuckGo HTML results page. Result links are redirect URLs
/// carrying the real target in the `uddg` query parameter.
pub(crate) fn parse(html: &str, query: &str) -> Vec<SearchResult> {
    let document = Html::parse_document(html);
    let result_selector = Selector::parse("div.result").expect("result selector");
    let title_selector = Selector::parse("a.result__a").expect("title selector");
    let snippet_selector = Selector::parse("a.result__snippet, div.result__snippet")
        .expect("snippet selector");

    let scorer = RelevanceScorer::new(query);
    let mut results = Vec::new();

    for element in document.select(&result_selector) {
        let Some(title_elem) = element.select(&title_selector).next() else {
            continue;
        };

        let title = title_elem.text().collect::<String>().trim().to_string();
        let url = title_elem
            .value()
            .attr("href")
            .map(decode_redirect_url)
            .unwrap_or_default();

        if title.is_empty() || url.is_empty() {
            warn!("Skipping DuckDuckGo result with missing title or url");
            continue;
        }

        let snippet = element
            .select(&snippet_selector)
            .next()
            .map(|e| e.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        let mut result = SearchResult::new(title.clone(), url, snippet.clone(), LABEL);
        result.relevance_score = scorer.score(&title, &snippet);
        results.push(result);
    }

    results
}

/// Unwrap `//duckduckgo.com/l/?uddg=<target>` redirect links; anything else
/// passes through verbatim.
fn decode_redirect_url(href: &str) -> String {
    let absolute = if href.starts_with("//") {
        format!("https:{}", href)
    } else {
        href.to_string()
    };

    if absolute.contains("duckduckgo.com/l/") {
        if let Ok(parsed) = Url::parse(&absolute) {
            if let Some((_, target)) = parsed.query_pairs().find(|(key, _)| key == "uddg") {
                return target.into_owned();
            }
        }
    }

    absolute
}
