//! Status endpoints: health, metrics and the last cycle report

use std::sync::Arc;
use std::time::Instant;

use axum_test::TestServer;
use serde_json::Value;
use stock_advisor::core::http::{create_router, AppState, HealthStatus};
use stock_advisor::core::orchestrator::AlertOrchestrator;
use stock_advisor::metrics::Metrics;
use tokio::sync::RwLock;

use crate::test_utils::{
    flat_then, orchestrator_at, settings, strong, uptrend, FakeMarket, RecordingNotifier,
    StaticDiscovery,
};

struct TestApiServer {
    server: TestServer,
    orchestrator: AlertOrchestrator,
}

impl TestApiServer {
    fn new() -> Self {
        let market = FakeMarket::default()
            .with("NVDA", uptrend(), strong())
            .with("XOM", flat_then(85.0), strong());
        let orchestrator = orchestrator_at(
            10,
            settings(&["NVDA"], &["XOM"]),
            market,
            StaticDiscovery::default(),
            Arc::new(RecordingNotifier::default()),
        );

        let state = AppState {
            health: Arc::new(RwLock::new(HealthStatus::default())),
            metrics: Arc::new(Metrics::new().expect("metrics initialization")),
            start_time: Arc::new(Instant::now()),
            last_report: orchestrator.last_report(),
        };
        let server = TestServer::new(create_router(state)).expect("start test server");

        Self {
            server,
            orchestrator,
        }
    }
}

#[tokio::test]
async fn health_endpoint_reports_healthy_status() {
    let app = TestApiServer::new();
    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime_seconds"].as_u64().is_some());
    assert_eq!(body["service"], "stock-advisor");
}

#[tokio::test]
async fn metrics_endpoint_exposes_prometheus_metrics() {
    let app = TestApiServer::new();
    let _ = app.server.get("/health").await;

    let response = app.server.get("/metrics").await;
    assert_eq!(response.status_code(), 200);

    let body = response.text();
    for name in [
        "advisor_cycles_total",
        "advisor_notifications_sent_total",
        "http_requests_total",
        "http_request_duration_seconds",
        "http_requests_in_flight",
    ] {
        assert!(body.contains(name), "Expected {} metric", name);
    }
}

#[tokio::test]
async fn last_cycle_is_not_found_before_first_cycle() {
    let app = TestApiServer::new();
    let response = app.server.get("/api/last-cycle").await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn last_cycle_returns_report_after_cycle() {
    let app = TestApiServer::new();
    app.orchestrator.run_cycle().await;

    let response = app.server.get("/api/last-cycle").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["top_picks"][0], "NVDA");
    assert_eq!(body["results"][0]["short_term"], "Bullish");
    assert_eq!(body["results"][0]["long_term"], "StrongFundamentals");
    assert_eq!(body["dip_hits"][0]["symbol"], "XOM");
    assert_eq!(body["notifications_sent"], 2);
    assert_eq!(body["summary_sent"], false);
}
