use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

use crate::shared::config::RestClientConfig;

use super::super::RestClient;
use super::*;

const FEED_BODY: &str = r#"{
    "status": "success",
    "totalResults": 2,
    "results": [
        {
            "title": "Bitcoin rallies on institutional inflows",
            "description": "Funds keep accumulating.",
            "content": "Full article text.",
            "link": "https://news.example.com/btc-rally",
            "pubDate": "2026-08-06 09:15:00",
            "keywords": ["BTC", "markets"],
            "language": "en"
        },
        {
            "title": "Chipmaker beats earnings estimates",
            "description": null,
            "content": null,
            "link": "https://news.example.com/chips",
            "pubDate": "2026-08-06 08:00:00",
            "keywords": null,
            "language": "en"
        }
    ]
}"#;

async fn init_client(server: &MockServer) -> std::sync::Arc<RestClient> {
    RestClient::new(RestClientConfig::default(), server.uri(), "test-key")
        .expect("must create news `RestClient`")
}

#[tokio::test]
async fn get_latest_parses_feed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/1/news"))
        .and(query_param("category", "business"))
        .and(query_param("language", "en"))
        .and(query_param("apikey", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(FEED_BODY, "application/json"))
        .mount(&server)
        .await;

    let api = init_client(&server).await;

    let feed = api
        .feed
        .get_latest(Some("business"), Some("en"))
        .await
        .expect("must get feed");

    assert!(feed.is_success());
    assert_eq!(feed.total_results(), Some(2));
    assert_eq!(feed.results().len(), 2);

    let first = &feed.results()[0];
    assert_eq!(first.title(), Some("Bitcoin rallies on institutional inflows"));
    assert_eq!(first.body(), Some("Full article text."));
    assert_eq!(first.keywords(), ["BTC".to_string(), "markets".to_string()]);
    assert!(first.published_at().is_some());

    let second = &feed.results()[1];
    assert_eq!(second.body(), None);
    assert!(second.keywords().is_empty());
}

#[tokio::test]
async fn get_latest_retries_without_filters_on_422() {
    let server = MockServer::start().await;

    // Filtered request is rejected by the provider plan
    Mock::given(method("GET"))
        .and(path("/api/1/news"))
        .and(query_param("category", "business"))
        .respond_with(ResponseTemplate::new(422).set_body_raw(
            r#"{"status":"error","results":{"message":"unsupported filter"}}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    // Unfiltered retry succeeds
    Mock::given(method("GET"))
        .and(path("/api/1/news"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(FEED_BODY, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let api = init_client(&server).await;

    let feed = api
        .feed
        .get_latest(Some("business"), None)
        .await
        .expect("must fall back to the unfiltered request");

    assert!(feed.is_success());
    assert_eq!(feed.results().len(), 2);
}
