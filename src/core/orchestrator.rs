//! One analysis cycle over the watchlist and the dip-only list.
//!
//! Symbols are processed strictly in order, one at a time. A failure on one
//! symbol is logged and skipped; a failed notification is logged and counted.
//! Neither stops the cycle.

use chrono::{NaiveDateTime, Timelike, Utc};
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::common::math::round2;
use crate::config::{AdvisorConfig, SignalConfig};
use crate::core::context::AdvisorContext;
use crate::core::format::{buy_candidate_message, dip_message, render_table, summary_message};
use crate::models::analysis::AnalysisResult;
use crate::models::price::LookbackPeriod;
use crate::services::error::ServiceError;
use crate::signals::engine::{AnalysisMode, SignalEngine};

/// Symbol lists and schedule-independent knobs for a cycle.
#[derive(Debug, Clone)]
pub struct CycleSettings {
    pub watchlist: Vec<String>,
    pub dip_only_symbols: Vec<String>,
    pub discovery_sectors: Vec<String>,
    pub summary_hour: u32,
    pub lookback: LookbackPeriod,
    pub signal: SignalConfig,
}

impl Default for CycleSettings {
    fn default() -> Self {
        Self::from(&AdvisorConfig::default())
    }
}

impl From<&AdvisorConfig> for CycleSettings {
    fn from(config: &AdvisorConfig) -> Self {
        Self {
            watchlist: config.watchlist.clone(),
            dip_only_symbols: config.dip_only_symbols.clone(),
            discovery_sectors: config.discovery_sectors.clone(),
            summary_hour: config.summary_hour,
            lookback: config.lookback,
            signal: config.signal,
        }
    }
}

/// What one cycle did.
#[derive(Debug, Clone, Serialize)]
pub struct CycleReport {
    pub started_at: NaiveDateTime,
    pub finished_at: NaiveDateTime,
    /// Watchlist results, in watchlist order.
    pub results: Vec<AnalysisResult>,
    /// Dip-only symbols that raised a dip alert.
    pub dip_hits: Vec<AnalysisResult>,
    pub top_picks: Vec<String>,
    pub discovered: BTreeSet<String>,
    pub notifications_sent: usize,
    pub notification_failures: usize,
    pub summary_sent: bool,
}

pub type SharedReport = Arc<RwLock<Option<CycleReport>>>;

#[derive(Default)]
struct NotificationTally {
    sent: usize,
    failed: usize,
}

pub struct AlertOrchestrator {
    settings: CycleSettings,
    engine: SignalEngine,
    ctx: AdvisorContext,
    last_report: SharedReport,
}

impl AlertOrchestrator {
    pub fn new(settings: CycleSettings, ctx: AdvisorContext) -> Self {
        let engine = SignalEngine::new(settings.signal);
        Self {
            settings,
            engine,
            ctx,
            last_report: Arc::new(RwLock::new(None)),
        }
    }

    /// Handle to the most recent report, shared with the status API.
    pub fn last_report(&self) -> SharedReport {
        self.last_report.clone()
    }

    /// Run one full cycle and drive its notifications.
    pub async fn run_cycle(&self) -> CycleReport {
        let timer = Instant::now();
        let started_at = self.ctx.clock.now();
        info!(
            watchlist = self.settings.watchlist.len(),
            dip_only = self.settings.dip_only_symbols.len(),
            "Cycle: starting at {}",
            started_at.format("%Y-%m-%d %H:%M:%S")
        );

        let discovered = self.discover_universe().await;

        let mut tally = NotificationTally::default();
        let mut results: Vec<AnalysisResult> = Vec::new();
        let mut top_picks: Vec<String> = Vec::new();

        for symbol in &self.settings.watchlist {
            let Some(result) = self.analyze_symbol(symbol, AnalysisMode::Full).await else {
                continue;
            };

            if result.is_strong_buy() && !top_picks.contains(&result.symbol) {
                info!(symbol = %result.symbol, "Cycle: strong buy candidate");
                self.notify(&buy_candidate_message(&result), &mut tally).await;
                top_picks.push(result.symbol.clone());
            }

            if let Some(alert) = &result.dip_alert {
                self.record_dip(&result.symbol, alert.percent_drop);
                self.notify(&dip_message(&result, alert), &mut tally).await;
            }

            results.push(result);
        }

        let mut dip_hits: Vec<AnalysisResult> = Vec::new();
        for symbol in &self.settings.dip_only_symbols {
            let Some(result) = self.analyze_symbol(symbol, AnalysisMode::DipOnly).await else {
                continue;
            };
            if let Some(alert) = &result.dip_alert {
                self.record_dip(&result.symbol, alert.percent_drop);
                self.notify(&dip_message(&result, alert), &mut tally).await;
            }
            dip_hits.push(result);
        }

        info!("Watchlist analysis\n{}", render_table(&results));

        let finished_at = self.ctx.clock.now();
        let summary_sent = if finished_at.hour() == self.settings.summary_hour {
            let picks: Vec<&AnalysisResult> = top_picks
                .iter()
                .filter_map(|symbol| results.iter().find(|r| &r.symbol == symbol))
                .collect();
            info!(top_picks = picks.len(), "Cycle: sending daily summary");
            self.notify(&summary_message(&picks, self.settings.summary_hour), &mut tally)
                .await
        } else {
            false
        };

        let elapsed = timer.elapsed();
        if let Some(metrics) = &self.ctx.metrics {
            metrics.cycles_total.inc();
            metrics.cycle_duration_seconds.observe(elapsed.as_secs_f64());
            metrics
                .last_cycle_timestamp_seconds
                .set(Utc::now().timestamp() as f64);
        }

        info!(
            analyzed = results.len(),
            dip_hits = dip_hits.len(),
            top_picks = top_picks.len(),
            discovered = discovered.len(),
            notifications_sent = tally.sent,
            notification_failures = tally.failed,
            duration_ms = elapsed.as_millis() as u64,
            "Cycle: finished"
        );

        let report = CycleReport {
            started_at,
            finished_at,
            results,
            dip_hits,
            top_picks,
            discovered,
            notifications_sent: tally.sent,
            notification_failures: tally.failed,
            summary_sent,
        };

        *self.last_report.write().await = Some(report.clone());
        report
    }

    /// Analyse one symbol, turning every failure into `None`.
    pub async fn analyze_symbol(&self, symbol: &str, mode: AnalysisMode) -> Option<AnalysisResult> {
        match self.try_analyze(symbol, mode).await {
            Ok(result) => result,
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "Analysis: skipping symbol");
                self.record_skip();
                None
            }
        }
    }

    async fn try_analyze(
        &self,
        symbol: &str,
        mode: AnalysisMode,
    ) -> Result<Option<AnalysisResult>, ServiceError> {
        let series = self
            .ctx
            .prices
            .price_history(symbol, self.settings.lookback)
            .await?;

        let min_points = self.engine.config().min_points;
        if series.len() < min_points {
            debug!(
                symbol = %symbol,
                count = series.len(),
                min = min_points,
                "Analysis: not enough history ({} < {}) for {}",
                series.len(),
                min_points,
                symbol
            );
            self.record_skip();
            return Ok(None);
        }

        let fundamentals = self.ctx.fundamentals.fundamentals(symbol).await?;
        if let Some(metrics) = &self.ctx.metrics {
            metrics.symbols_analyzed_total.inc();
        }

        let result = self.engine.analyze(&series, &fundamentals, mode);
        if let Some(r) = &result {
            debug!(
                symbol = %symbol,
                short_term = ?r.short_term,
                long_term = ?r.long_term,
                dip = r.dip_alert.is_some(),
                "Analysis: {} done",
                symbol
            );
        }
        Ok(result)
    }

    async fn discover_universe(&self) -> BTreeSet<String> {
        let mut universe = BTreeSet::new();
        for sector in &self.settings.discovery_sectors {
            universe.extend(self.ctx.discovery.discover(sector).await);
        }
        if !self.settings.discovery_sectors.is_empty() {
            info!(
                sectors = ?self.settings.discovery_sectors,
                count = universe.len(),
                "Discovery: {} symbols in the suggested universe",
                universe.len()
            );
        }
        universe
    }

    /// Deliver one message; returns whether the sink accepted it.
    async fn notify(&self, message: &str, tally: &mut NotificationTally) -> bool {
        match self.ctx.notifier.send(message).await {
            Ok(()) => {
                tally.sent += 1;
                if let Some(metrics) = &self.ctx.metrics {
                    metrics.notifications_sent_total.inc();
                }
                true
            }
            Err(e) => {
                error!(sink = self.ctx.notifier.name(), error = %e, "Notification: delivery failed");
                tally.failed += 1;
                if let Some(metrics) = &self.ctx.metrics {
                    metrics.notification_failures_total.inc();
                }
                false
            }
        }
    }

    fn record_dip(&self, symbol: &str, percent_drop: f64) {
        info!(symbol = %symbol, percent_drop = round2(percent_drop), "Cycle: dip alert");
        if let Some(metrics) = &self.ctx.metrics {
            metrics.dip_alerts_total.inc();
        }
    }

    fn record_skip(&self) {
        if let Some(metrics) = &self.ctx.metrics {
            metrics.symbols_skipped_total.inc();
        }
    }
}
