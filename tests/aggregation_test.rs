// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use metasearch::domain::services::search_service::{SearchError, SearchService};
use metasearch::infrastructure::cache::{MemoryStore, SearchCache};
use metasearch::infrastructure::fetch::{Fetcher, FetcherConfig};
use metasearch::infrastructure::search::{SearchAggregator, SourceConfig, SourceKind};
use metasearch::utils::retry_policy::RetryPolicy;

const DDG_FIXTURE: &str = r##"
<html><body>
  <div class="result web-result">
    <h2 class="result__title">
      <a class="result__a" href="https://a.example/guide">Python Web Scraping Guide</a>
    </h2>
    <a class="result__snippet" href="#">python scraping tutorial</a>
  </div>
  <div class="result web-result">
    <h2 class="result__title">
      <a class="result__a" href="https://b.example/other">Unrelated</a>
    </h2>
    <a class="result__snippet" href="#">nothing relevant</a>
  </div>
</body></html>"##;

const BING_FIXTURE: &str = r#"
<html><body><ol id="b_results">
  <li class="b_algo">
    <h2><a href="https://a.example/guide">Python Web Scraping Guide</a></h2>
    <div class="b_caption"><p>python scraping walkthrough</p></div>
  </li>
  <li class="b_algo">
    <h2><a href="https://c.example/bing-only">Web scraping with python requests</a></h2>
    <div class="b_caption"><p>python web requests</p></div>
  </li>
</ol></body></html>"#;

const HN_FIXTURE: &str = r#"{
  "hits": [
    {
      "title": "Web scraping at scale with Python",
      "url": "https://d.example/hn-story",
      "points": 120,
      "num_comments": 64,
      "objectID": "42"
    }
  ]
}"#;

const REDDIT_FIXTURE: &str = r#"{
  "data": {
    "children": [
      {
        "data": {
          "title": "Python web scraping tips",
          "permalink": "/r/python/comments/xyz/scraping_tips/",
          "selftext": "",
          "subreddit": "python",
          "score": 55
        }
      }
    ]
  }
}"#;

fn test_fetcher() -> Arc<Fetcher> {
    Arc::new(Fetcher::new(FetcherConfig {
        request_timeout: Duration::from_secs(5),
        max_retries: 2,
        delay_range_ms: (0, 1),
        respect_robots: false,
        retry_policy: RetryPolicy {
            max_retries: 2,
            initial_backoff: Duration::from_millis(10),
            max_backoff: Duration::from_millis(50),
            backoff_multiplier: 2.0,
            jitter_factor: 0.0,
            enable_jitter: false,
        },
    }))
}

fn service_for(registry: Vec<SourceConfig>, enrich_top: usize) -> SearchService {
    let aggregator =
        SearchAggregator::new(registry, test_fetcher()).with_enrich_top(enrich_top);
    let cache = SearchCache::new(Arc::new(MemoryStore::new()), chrono::Duration::hours(1));
    SearchService::new(aggregator, cache)
}

async fn mount(server: &MockServer, route: &str, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(template)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_partial_source_failure_still_returns_results() {
    let server = MockServer::start().await;
    mount(&server, "/ddg", ResponseTemplate::new(200).set_body_string(DDG_FIXTURE)).await;
    mount(&server, "/bing", ResponseTemplate::new(500)).await;
    mount(&server, "/yahoo", ResponseTemplate::new(500)).await;
    mount(&server, "/hn", ResponseTemplate::new(200).set_body_string(HN_FIXTURE)).await;
    mount(&server, "/reddit", ResponseTemplate::new(200).set_body_string(REDDIT_FIXTURE)).await;

    let registry = vec![
        SourceConfig::with_endpoint(SourceKind::DuckDuckGo, format!("{}/ddg", server.uri())),
        SourceConfig::with_endpoint(SourceKind::Bing, format!("{}/bing", server.uri())),
        SourceConfig::with_endpoint(SourceKind::Yahoo, format!("{}/yahoo", server.uri())),
        SourceConfig::with_endpoint(SourceKind::HackerNews, format!("{}/hn", server.uri())),
        SourceConfig::with_endpoint(SourceKind::Reddit, format!("{}/reddit", server.uri())),
    ];
    let service = service_for(registry, 0);

    let results = service
        .search("python web scraping", 20, false)
        .await
        .unwrap();

    assert!(!results.is_empty());
    let sources: Vec<&str> = results.iter().map(|r| r.source.as_str()).collect();
    assert!(sources.contains(&"duckduckgo"));
    assert!(sources.contains(&"hackernews"));
    assert!(sources.contains(&"reddit"));
    assert!(!sources.contains(&"bing"));
    assert!(!sources.contains(&"yahoo"));
}

#[tokio::test]
async fn test_dedup_prefers_earlier_source_and_ranks_by_score() {
    let server = MockServer::start().await;
    mount(&server, "/ddg", ResponseTemplate::new(200).set_body_string(DDG_FIXTURE)).await;
    mount(&server, "/bing", ResponseTemplate::new(200).set_body_string(BING_FIXTURE)).await;

    let registry = vec![
        SourceConfig::with_endpoint(SourceKind::DuckDuckGo, format!("{}/ddg", server.uri())),
        SourceConfig::with_endpoint(SourceKind::Bing, format!("{}/bing", server.uri())),
    ];
    let service = service_for(registry, 0);

    let results = service
        .search("python web scraping", 20, false)
        .await
        .unwrap();

    // https://a.example/guide appears in both fixtures; the registry-earlier
    // source must win the keep-first dedup
    let guide: Vec<_> = results
        .iter()
        .filter(|r| r.url == "https://a.example/guide")
        .collect();
    assert_eq!(guide.len(), 1);
    assert_eq!(guide[0].source, "duckduckgo");

    // Output sorted by relevance, descending
    for pair in results.windows(2) {
        assert!(pair[0].relevance_score >= pair[1].relevance_score);
    }
    assert_eq!(results[0].url, "https://a.example/guide");
    assert_eq!(results.last().unwrap().url, "https://b.example/other");
}

#[tokio::test]
async fn test_max_results_one_returns_single_top_record() {
    let server = MockServer::start().await;
    mount(&server, "/ddg", ResponseTemplate::new(200).set_body_string(DDG_FIXTURE)).await;
    mount(&server, "/bing", ResponseTemplate::new(200).set_body_string(BING_FIXTURE)).await;
    mount(&server, "/hn", ResponseTemplate::new(200).set_body_string(HN_FIXTURE)).await;
    mount(&server, "/reddit", ResponseTemplate::new(200).set_body_string(REDDIT_FIXTURE)).await;

    let registry = vec![
        SourceConfig::with_endpoint(SourceKind::DuckDuckGo, format!("{}/ddg", server.uri())),
        SourceConfig::with_endpoint(SourceKind::Bing, format!("{}/bing", server.uri())),
        SourceConfig::with_endpoint(SourceKind::HackerNews, format!("{}/hn", server.uri())),
        SourceConfig::with_endpoint(SourceKind::Reddit, format!("{}/reddit", server.uri())),
    ];
    let service = service_for(registry, 0);

    let results = service
        .search("python web scraping", 1, false)
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    // "Python Web Scraping Guide" matches every query word in the title
    assert_eq!(results[0].url, "https://a.example/guide");
}

#[tokio::test]
async fn test_empty_query_issues_no_network_calls() {
    let server = MockServer::start().await;

    let registry = vec![SourceConfig::with_endpoint(
        SourceKind::DuckDuckGo,
        format!("{}/ddg", server.uri()),
    )];
    let service = service_for(registry, 0);

    let err = service.search("   ", 10, true).await.unwrap_err();
    assert_eq!(err, SearchError::InvalidQuery);

    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_second_search_is_served_from_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ddg"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DDG_FIXTURE))
        .expect(1)
        .mount(&server)
        .await;

    let registry = vec![SourceConfig::with_endpoint(
        SourceKind::DuckDuckGo,
        format!("{}/ddg", server.uri()),
    )];
    let service = service_for(registry, 0);

    let first = service
        .search("python web scraping", 10, true)
        .await
        .unwrap();
    let second = service
        .search("python web scraping", 10, true)
        .await
        .unwrap();

    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_cache_disabled_fetches_every_time() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ddg"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DDG_FIXTURE))
        .expect(2)
        .mount(&server)
        .await;

    let registry = vec![SourceConfig::with_endpoint(
        SourceKind::DuckDuckGo,
        format!("{}/ddg", server.uri()),
    )];
    let service = service_for(registry, 0);

    service.search("python web scraping", 10, false).await.unwrap();
    service.search("python web scraping", 10, false).await.unwrap();
}

#[tokio::test]
async fn test_enrichment_fills_content_for_top_results() {
    let server = MockServer::start().await;

    let page_url = format!("{}/page", server.uri());
    let fixture = format!(
        r##"<html><body>
          <div class="result web-result">
            <h2 class="result__title">
              <a class="result__a" href="{}">Python Web Scraping Guide</a>
            </h2>
            <a class="result__snippet" href="#">python scraping tutorial</a>
          </div>
        </body></html>"##,
        page_url
    );

    mount(&server, "/ddg", ResponseTemplate::new(200).set_body_string(fixture)).await;
    mount(
        &server,
        "/page",
        ResponseTemplate::new(200).set_body_string(
            "<html><head><script>ignored()</script></head><body><p>Deep   page\ncontent</p></body></html>",
        ),
    )
    .await;

    let registry = vec![SourceConfig::with_endpoint(
        SourceKind::DuckDuckGo,
        format!("{}/ddg", server.uri()),
    )];
    let service = service_for(registry, 5);

    let results = service
        .search("python web scraping", 10, false)
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].content, "Deep page content");
}

#[tokio::test]
async fn test_enrichment_failure_leaves_content_empty() {
    let server = MockServer::start().await;

    let page_url = format!("{}/missing", server.uri());
    let fixture = format!(
        r##"<html><body>
          <div class="result web-result">
            <h2 class="result__title">
              <a class="result__a" href="{}">Python Web Scraping Guide</a>
            </h2>
            <a class="result__snippet" href="#">python scraping tutorial</a>
          </div>
        </body></html>"##,
        page_url
    );

    mount(&server, "/ddg", ResponseTemplate::new(200).set_body_string(fixture)).await;
    mount(&server, "/missing", ResponseTemplate::new(404)).await;

    let registry = vec![SourceConfig::with_endpoint(
        SourceKind::DuckDuckGo,
        format!("{}/ddg", server.uri()),
    )];
    let service = service_for(registry, 5);

    let results = service
        .search("python web scraping", 10, false)
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert!(results[0].content.is_empty());
}
