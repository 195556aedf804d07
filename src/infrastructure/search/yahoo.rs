// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use scraper::{Html, Selector};

use crate::domain::models::search_result::SearchResult;
use crate::domain::services::relevance_scorer::RelevanceScorer;

pub(crate) const LABEL: &str = "yahoo";
pub(crate) const DEFAULT_ENDPOINT: &str = "https://search.yahoo.com/search";

pub(crate) fn request_params(query: &str) -> Vec<(&'static str, String)> {
    // Yahoo uses `p`, not `q`
    vec![("p", query.to_string())]
}

pub(crate) fn parse(html: &str, query: &str) -> Vec<SearchResult> {
    let document = Html::parse_document(html);
    let result_selector = Selector::parse("div.algo, div.dd").expect("result selector");
    let title_selector = Selector::parse("h3 a").expect("title selector");
    let snippet_selector =
        Selector::parse("div.compText p, p, span.fz-ms").expect("snippet selector");

    let scorer = RelevanceScorer::new(query);
    let mut results = Vec::new();

    for element in document.select(&result_selector) {
        let Some(title_elem) = element.select(&title_selector).next() else {
            continue;
        };

        let title = title_elem.text().collect::<String>().trim().to_string();
        let url = title_elem.value().attr("href").unwrap_or_default().to_string();

        if title.is_empty() || !url.starts_with("http") {
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
