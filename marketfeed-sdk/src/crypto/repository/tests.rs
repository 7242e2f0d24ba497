use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param},
};

use crate::shared::{config::RestClientConfig, rest::error::RestApiError};

use super::super::RestClient;
use super::*;

const QUOTES_BODY: &str = r#"{
    "status": {"error_code": 0, "error_message": null},
    "data": {
        "BTC": {
            "symbol": "BTC",
            "quote": {
                "USD": {
                    "price": 97543.21,
                    "percent_change_24h": -1.73,
                    "volume_24h": 31200000000.0,
                    "market_cap": 1930000000000.0
                }
            }
        },
        "ETH": {
            "symbol": "ETH",
            "quote": {
                "USD": {
                    "price": 3650.4,
                    "percent_change_24h": 2.11,
                    "volume_24h": 17800000000.0,
                    "market_cap": 439000000000.0
                }
            }
        }
    }
}"#;

async fn init_client(server: &MockServer) -> std::sync::Arc<RestClient> {
    RestClient::new(RestClientConfig::default(), server.uri(), "test-key")
        .expect("must create crypto `RestClient`")
}

#[tokio::test]
async fn get_quotes_flattens_by_symbol() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/cryptocurrency/quotes/latest"))
        .and(query_param("symbol", "BTC,ETH"))
        .and(query_param("convert", "USD"))
        .and(header("x-cmc_pro_api_key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(QUOTES_BODY, "application/json"))
        .mount(&server)
        .await;

    let api = init_client(&server).await;

    let response = api
        .quotes
        .get_quotes(&["btc".to_string(), "eth".to_string()], "usd")
        .await
        .expect("must get quotes");

    let quotes = response.quotes_in("USD");
    assert_eq!(quotes.len(), 2);

    let btc = quotes.get("BTC").expect("BTC quote is present");
    assert_eq!(btc.price(), Some(97543.21));
    assert_eq!(btc.percent_change_24h(), Some(-1.73));
    assert_eq!(btc.market_cap(), Some(1930000000000.0));

    // No quote was requested in EUR
    assert!(response.quotes_in("EUR").is_empty());
}

#[tokio::test]
async fn get_quotes_surfaces_in_body_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/cryptocurrency/quotes/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"status": {"error_code": 1002, "error_message": "API key missing."}, "data": {}}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let api = init_client(&server).await;

    let err = api
        .quotes
        .get_quotes(&["BTC".to_string()], "USD")
        .await
        .expect_err("must surface the provider error");

    assert!(matches!(err, RestApiError::Provider { code: 1002, .. }));
}
