//! Stock Advisor
//!
//! Analyses the configured watchlist every interval and pushes buy, dip and
//! daily summary alerts to the notification sink.

use dotenvy::dotenv;
use std::sync::Arc;
use std::time::{Duration, Instant};
use stock_advisor::config::AdvisorConfig;
use stock_advisor::core::clock::SystemClock;
use stock_advisor::core::context::AdvisorContext;
use stock_advisor::core::http::{start_server, AppState, HealthStatus};
use stock_advisor::core::orchestrator::{AlertOrchestrator, CycleSettings};
use stock_advisor::core::scheduler::CycleScheduler;
use stock_advisor::logging;
use stock_advisor::metrics::Metrics;
use stock_advisor::services::{
    FinvizScreener, LogNotifier, Notifier, TelegramNotifier, YahooFinanceClient,
};
use tokio::signal;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let mut config = AdvisorConfig::from_env()?;
    let env = stock_advisor::config::get_environment();
    info!(environment = %env, "Starting Stock Advisor");
    info!(
        symbols = ?config.watchlist,
        "Watchlist: {} symbols",
        config.watchlist.len()
    );
    info!(
        symbols = ?config.dip_only_symbols,
        "Dip-only list: {} symbols",
        config.dip_only_symbols.len()
    );
    info!(
        interval = config.evaluation_interval_seconds,
        summary_hour = config.summary_hour,
        range = %config.lookback,
        "Analysis every {} seconds",
        config.evaluation_interval_seconds
    );

    let timeout = Duration::from_secs(config.http_timeout_seconds);
    let yahoo = Arc::new(YahooFinanceClient::new(
        config.yahoo_base_url.as_str(),
        config.yahoo_cookie_url.as_str(),
        timeout,
    )?);
    let discovery = Arc::new(FinvizScreener::new(config.finviz_base_url.as_str(), timeout)?);

    let notifier: Arc<dyn Notifier> = match config.telegram.take() {
        Some(telegram) => {
            info!(chat_id = %telegram.chat_id, "Notifications: Telegram");
            Arc::new(TelegramNotifier::new(telegram, timeout)?)
        }
        None => {
            warn!("TELEGRAM_BOT_TOKEN/TELEGRAM_CHAT_ID not set - alerts will only be logged");
            Arc::new(LogNotifier)
        }
    };

    let metrics = Arc::new(Metrics::new()?);
    let ctx = AdvisorContext::new(
        yahoo.clone(),
        yahoo,
        discovery,
        notifier,
        Arc::new(SystemClock),
    )
    .with_metrics(metrics.clone());
    let orchestrator = Arc::new(AlertOrchestrator::new(CycleSettings::from(&config), ctx));

    if let Some(port) = config.port {
        let state = AppState {
            health: Arc::new(RwLock::new(HealthStatus::default())),
            metrics: metrics.clone(),
            start_time: Arc::new(Instant::now()),
            last_report: orchestrator.last_report(),
        };
        tokio::spawn(async move {
            if let Err(e) = start_server(state, port).await {
                error!(error = %e, "HTTP server error");
            }
        });
    }

    if config.run_once {
        info!("RUN_ONCE set, running a single cycle");
        orchestrator.run_cycle().await;
        return Ok(());
    }

    let scheduler = CycleScheduler::new(orchestrator, config.evaluation_interval_seconds)
        .map_err(|e| format!("Failed to create scheduler: {}", e))?;
    scheduler
        .start()
        .await
        .map_err(|e| format!("Failed to start scheduler: {}", e))?;

    info!("Advisor started, waiting for shutdown signal...");
    signal::ctrl_c().await?;
    info!("Shutting down advisor...");
    scheduler.stop().await;
    info!("Advisor stopped");

    Ok(())
}
