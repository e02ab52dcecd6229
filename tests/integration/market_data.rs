//! Yahoo chart and quote clients against a mocked API

use std::time::Duration;

use chrono::NaiveDate;
use serde_json::json;
use stock_advisor::models::price::LookbackPeriod;
use stock_advisor::services::{
    FundamentalsProvider, PriceHistoryProvider, ServiceError, YahooFinanceClient,
};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// 2024-06-03 and 2024-06-04, 13:30 UTC
const DAY_ONE: i64 = 1_717_421_400;
const DAY_TWO: i64 = DAY_ONE + 86_400;
const DAY_THREE: i64 = DAY_TWO + 86_400;

const SESSION_COOKIE: &str = "A3=session-abc";

fn client(server: &MockServer) -> YahooFinanceClient {
    YahooFinanceClient::new(
        server.uri(),
        format!("{}/cookie", server.uri()),
        Duration::from_secs(5),
    )
    .expect("client")
}

/// Cookie page plus crumb endpoint; the crumb is only issued with the cookie.
async fn mount_session(server: &MockServer, crumbs: &[&str]) {
    Mock::given(method("GET"))
        .and(path("/cookie"))
        .respond_with(
            ResponseTemplate::new(404).insert_header("set-cookie", "A3=session-abc; Path=/"),
        )
        .mount(server)
        .await;

    for crumb in crumbs {
        Mock::given(method("GET"))
            .and(path("/v1/test/getcrumb"))
            .and(header("cookie", SESSION_COOKIE))
            .respond_with(ResponseTemplate::new(200).set_body_string(*crumb))
            .up_to_n_times(1)
            .mount(server)
            .await;
    }
}

fn quote_body(symbol: &str, pe: f64, eps: f64) -> serde_json::Value {
    json!({
        "quoteResponse": {
            "result": [{
                "symbol": symbol,
                "trailingPE": pe,
                "epsTrailingTwelveMonths": eps
            }],
            "error": null
        }
    })
}

#[tokio::test]
async fn chart_request_builds_series() {
    let server = MockServer::start().await;
    let body = json!({
        "chart": {
            "result": [{
                "meta": { "symbol": "AAPL", "gmtoffset": -14400 },
                "timestamp": [DAY_ONE, DAY_TWO, DAY_THREE],
                "indicators": { "quote": [{ "close": [190.5, null, 193.25] }] }
            }],
            "error": null
        }
    });
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/AAPL"))
        .and(query_param("range", "1y"))
        .and(query_param("interval", "1d"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let series = client(&server)
        .price_history("AAPL", LookbackPeriod::Years(1))
        .await
        .expect("series");

    assert_eq!(series.symbol, "AAPL");
    assert_eq!(series.closes(), vec![190.5, 193.25]);
    assert_eq!(
        series.points()[0].date,
        NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
    );
    assert_eq!(
        series.latest().unwrap().date,
        NaiveDate::from_ymd_opt(2024, 6, 5).unwrap()
    );
}

#[tokio::test]
async fn chart_error_envelope_is_api_error() {
    let server = MockServer::start().await;
    let body = json!({
        "chart": {
            "result": null,
            "error": { "code": "Not Found", "description": "No data found, symbol may be delisted" }
        }
    });
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/GONE"))
        .respond_with(ResponseTemplate::new(404).set_body_json(body))
        .mount(&server)
        .await;

    let err = client(&server)
        .price_history("GONE", LookbackPeriod::Months(6))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Api(ref msg) if msg.contains("Not Found")));
}

#[tokio::test]
async fn non_json_error_status_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/AAPL"))
        .respond_with(ResponseTemplate::new(503).set_body_string("<html>unavailable</html>"))
        .mount(&server)
        .await;

    let err = client(&server)
        .price_history("AAPL", LookbackPeriod::Years(1))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Api(_)));
}

#[tokio::test]
async fn quote_request_carries_session_crumb() {
    let server = MockServer::start().await;
    mount_session(&server, &["crumb-1"]).await;
    Mock::given(method("GET"))
        .and(path("/v7/finance/quote"))
        .and(query_param("symbols", "MSFT"))
        .and(query_param("crumb", "crumb-1"))
        .and(header("cookie", SESSION_COOKIE))
        .respond_with(ResponseTemplate::new(200).set_body_json(quote_body("MSFT", 35.2, 11.8)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v7/finance/quote"))
        .and(query_param("symbols", "AAPL"))
        .and(query_param("crumb", "crumb-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(quote_body("AAPL", 29.0, 6.4)))
        .mount(&server)
        .await;

    let yahoo = client(&server);
    let msft = yahoo.fundamentals("MSFT").await.expect("quote");
    assert_eq!(msft.trailing_pe, Some(35.2));
    assert_eq!(msft.trailing_eps, Some(11.8));

    let aapl = yahoo.fundamentals("AAPL").await.expect("quote");
    assert_eq!(aapl.trailing_pe, Some(29.0));

    // One session serves both quotes.
    let requests = server.received_requests().await.expect("recorded requests");
    let crumb_requests = requests
        .iter()
        .filter(|r| r.url.path() == "/v1/test/getcrumb")
        .count();
    assert_eq!(crumb_requests, 1);
}

#[tokio::test]
async fn rejected_crumb_renews_session() {
    let server = MockServer::start().await;
    mount_session(&server, &["stale", "fresh"]).await;
    Mock::given(method("GET"))
        .and(path("/v7/finance/quote"))
        .and(query_param("crumb", "stale"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "finance": {
                "result": null,
                "error": { "code": "Unauthorized", "description": "Invalid Crumb" }
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v7/finance/quote"))
        .and(query_param("crumb", "fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(quote_body("NVDA", 55.0, 2.1)))
        .mount(&server)
        .await;

    let fundamentals = client(&server).fundamentals("NVDA").await.expect("quote");
    assert_eq!(fundamentals.trailing_pe, Some(55.0));
}

#[tokio::test]
async fn missing_session_cookie_is_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cookie"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/test/getcrumb"))
        .respond_with(ResponseTemplate::new(401).set_body_string(""))
        .mount(&server)
        .await;

    let err = client(&server).fundamentals("MSFT").await.unwrap_err();
    assert!(matches!(err, ServiceError::Unauthorized(_)));
}

#[tokio::test]
async fn quote_without_pe_is_partial() {
    let server = MockServer::start().await;
    mount_session(&server, &["crumb-1"]).await;
    let body = json!({
        "quoteResponse": {
            "result": [{ "symbol": "LITE", "epsTrailingTwelveMonths": -3.1 }],
            "error": null
        }
    });
    Mock::given(method("GET"))
        .and(path("/v7/finance/quote"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let fundamentals = client(&server).fundamentals("LITE").await.expect("quote");
    assert!(fundamentals.trailing_pe.is_none());
    assert_eq!(fundamentals.trailing_eps, Some(-3.1));
}
