//! Prometheus metrics for analysis cycles, notifications and the HTTP surface.

use prometheus::{Encoder, Gauge, Histogram, HistogramOpts, IntCounter, IntGauge, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,

    pub cycles_total: IntCounter,
    pub cycle_duration_seconds: Histogram,
    pub last_cycle_timestamp_seconds: Gauge,
    pub symbols_analyzed_total: IntCounter,
    pub symbols_skipped_total: IntCounter,
    pub dip_alerts_total: IntCounter,
    pub notifications_sent_total: IntCounter,
    pub notification_failures_total: IntCounter,

    pub http_requests_total: IntCounter,
    pub http_request_duration_seconds: Histogram,
    pub http_requests_in_flight: IntGauge,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let cycles_total = IntCounter::new("advisor_cycles_total", "Completed analysis cycles")?;
        let cycle_duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "advisor_cycle_duration_seconds",
                "Wall time of one analysis cycle",
            )
            .buckets(vec![1.0, 5.0, 15.0, 30.0, 60.0, 120.0, 300.0, 600.0]),
        )?;
        let last_cycle_timestamp_seconds = Gauge::new(
            "advisor_last_cycle_timestamp_seconds",
            "Unix time at which the last cycle finished",
        )?;
        let symbols_analyzed_total = IntCounter::new(
            "advisor_symbols_analyzed_total",
            "Symbols that produced an analysis",
        )?;
        let symbols_skipped_total = IntCounter::new(
            "advisor_symbols_skipped_total",
            "Symbols skipped for short history or fetch errors",
        )?;
        let dip_alerts_total = IntCounter::new("advisor_dip_alerts_total", "Dip alerts raised")?;
        let notifications_sent_total = IntCounter::new(
            "advisor_notifications_sent_total",
            "Notifications delivered to the sink",
        )?;
        let notification_failures_total = IntCounter::new(
            "advisor_notification_failures_total",
            "Notifications the sink failed to deliver",
        )?;

        let http_requests_total = IntCounter::new("http_requests_total", "HTTP requests served")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency",
        ))?;
        let http_requests_in_flight =
            IntGauge::new("http_requests_in_flight", "HTTP requests currently being served")?;

        registry.register(Box::new(cycles_total.clone()))?;
        registry.register(Box::new(cycle_duration_seconds.clone()))?;
        registry.register(Box::new(last_cycle_timestamp_seconds.clone()))?;
        registry.register(Box::new(symbols_analyzed_total.clone()))?;
        registry.register(Box::new(symbols_skipped_total.clone()))?;
        registry.register(Box::new(dip_alerts_total.clone()))?;
        registry.register(Box::new(notifications_sent_total.clone()))?;
        registry.register(Box::new(notification_failures_total.clone()))?;
        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;

        Ok(Self {
            registry,
            cycles_total,
            cycle_duration_seconds,
            last_cycle_timestamp_seconds,
            symbols_analyzed_total,
            symbols_skipped_total,
            dip_alerts_total,
            notifications_sent_total,
            notification_failures_total,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_flight,
        })
    }

    /// Render all metrics in the Prometheus text format
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
