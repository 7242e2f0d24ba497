use chrono::{Duration, Utc};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

use crate::shared::config::RestClientConfig;

use super::super::{RestClient, models::CandleSeriesError};
use super::*;

async fn init_client(server: &MockServer) -> std::sync::Arc<RestClient> {
    RestClient::new(RestClientConfig::default(), server.uri(), "test-key")
        .expect("must create stocks `RestClient`")
}

#[tokio::test]
async fn get_quote_parses_provider_payload() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/quote"))
        .and(query_param("symbol", "AAPL"))
        .and(query_param("token", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"c":227.5,"h":229.87,"l":224.83,"o":226.5,"pc":224.18,"t":1701980003}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let api = init_client(&server).await;

    let quote = api.quotes.get_quote("aapl").await.expect("must get quote");

    assert_eq!(quote.current(), 227.5);
    assert_eq!(quote.open(), 226.5);
    assert_eq!(quote.prev_close(), 224.18);
    assert!(!quote.is_empty());
    assert!(quote.time().is_some());

    let change = quote.percent_change().expect("prev close is non-zero");
    assert!((change - 1.4809528).abs() < 1e-4);
}

#[tokio::test]
async fn get_quote_unknown_symbol_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/quote"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"c":0,"h":0,"l":0,"o":0,"pc":0,"t":0}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let api = init_client(&server).await;

    let quote = api
        .quotes
        .get_quote("NOSUCH")
        .await
        .expect("must get quote");

    assert!(quote.is_empty());
    assert_eq!(quote.percent_change(), None);
}

#[tokio::test]
async fn get_candles_assembles_parallel_arrays() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/stock/candle"))
        .and(query_param("symbol", "AAPL"))
        .and(query_param("resolution", "D"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{
                "s": "ok",
                "t": [1701907200, 1701993600],
                "o": [225.0, 227.0],
                "h": [229.0, 230.5],
                "l": [224.0, 226.1],
                "c": [227.5, 229.9],
                "v": [1000, 2000]
            }"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let api = init_client(&server).await;

    let to = Utc::now();
    let from = to - Duration::days(30);
    let series = api
        .quotes
        .get_candles("AAPL", CandleResolution::OneDay, from, to)
        .await
        .expect("must get candles");

    assert!(series.is_ok());

    let candles = series.try_into_candles().expect("arrays are aligned");
    assert_eq!(candles.len(), 2);
    assert_eq!(candles[0].close, 227.5);
    assert_eq!(candles[1].volume, 2000);
    assert!(candles[0].time < candles[1].time);
}

#[tokio::test]
async fn get_candles_no_data_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/stock/candle"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"s":"no_data"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let api = init_client(&server).await;

    let to = Utc::now();
    let from = to - Duration::days(1);
    let series = api
        .quotes
        .get_candles("AAPL", CandleResolution::FiveMinutes, from, to)
        .await
        .expect("must get candles");

    assert!(!series.is_ok());
    assert!(matches!(
        series.try_into_candles(),
        Err(CandleSeriesError::NotOk { .. })
    ));
}

#[tokio::test]
async fn error_response_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/stock/candle"))
        .respond_with(ResponseTemplate::new(403).set_body_raw(
            r#"{"error":"You don't have access to this resource."}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let api = init_client(&server).await;

    let to = Utc::now();
    let from = to - Duration::days(1);
    let err = api
        .quotes
        .get_candles("AAPL", CandleResolution::OneDay, from, to)
        .await
        .expect_err("must surface the error response");

    assert!(err.is_status(reqwest::StatusCode::FORBIDDEN));
}
