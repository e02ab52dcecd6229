//! Cron-based scheduler that runs analysis cycles back to back

use crate::core::orchestrator::AlertOrchestrator;
use chrono::{DateTime, Utc};
use cron::Schedule;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::Duration;
use tracing::{debug, info};

/// Convert a fixed interval into a six-field cron expression
/// (second minute hour day month weekday).
pub fn cron_expression(
    interval_seconds: u64,
) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    match interval_seconds {
        0 => Err("Scheduler disabled: interval_seconds is 0".into()),
        86_400 => Ok("0 0 0 * * *".to_string()),
        s if s % 3600 == 0 && s / 3600 < 24 => Ok(format!("0 0 */{} * * *", s / 3600)),
        s if s % 60 == 0 && s / 60 < 60 => Ok(format!("0 */{} * * * *", s / 60)),
        s if s < 60 => Ok(format!("*/{} * * * * *", s)),
        s => Err(format!(
            "interval {}s is not a whole number of seconds (<60), minutes (<60) or hours (<24)",
            s
        )
        .into()),
    }
}

/// Runs one cycle at start-up and then one per cron tick.
///
/// Each cycle is awaited before the next tick is computed, so cycles never
/// overlap; a cycle that overruns a tick simply waits for the following one.
pub struct CycleScheduler {
    orchestrator: Arc<AlertOrchestrator>,
    schedule: Schedule,
    handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl CycleScheduler {
    /// Create a new scheduler
    ///
    /// # Arguments
    /// * `orchestrator` - Runs the cycles
    /// * `interval_seconds` - Cycle interval in seconds (0 = disabled)
    pub fn new(
        orchestrator: Arc<AlertOrchestrator>,
        interval_seconds: u64,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let cron_expr = cron_expression(interval_seconds)?;

        let schedule = Schedule::from_str(&cron_expr).map_err(|e| {
            Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid cron expression '{}': {}", cron_expr, e),
            )) as Box<dyn std::error::Error + Send + Sync>
        })?;

        info!(
            interval = interval_seconds,
            cron = %cron_expr,
            "CycleScheduler: created with interval {}s (cron: {})",
            interval_seconds,
            cron_expr
        );

        Ok(Self {
            orchestrator,
            schedule,
            handle: Arc::new(RwLock::new(None)),
        })
    }

    /// Time from `now` until the next tick, `None` when the schedule is exhausted.
    pub fn delay_until_next(&self, now: DateTime<Utc>) -> Option<Duration> {
        next_delay(&self.schedule, now)
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let orchestrator = self.orchestrator.clone();
        let schedule = self.schedule.clone();
        let handle_arc = self.handle.clone();

        let handle = tokio::spawn(async move {
            info!("CycleScheduler: started, running first cycle now");
            orchestrator.run_cycle().await;

            loop {
                match next_delay(&schedule, Utc::now()) {
                    Some(delay) => {
                        debug!(wait_seconds = delay.as_secs(), "CycleScheduler: waiting for next tick");
                        tokio::time::sleep(delay).await;
                    }
                    None => {
                        // No more scheduled times, wait a bit and check again
                        tokio::time::sleep(Duration::from_secs(60)).await;
                        continue;
                    }
                }

                info!("CycleScheduler: cron tick");
                orchestrator.run_cycle().await;
            }
        });

        {
            let mut h = handle_arc.write().await;
            *h = Some(handle);
        }

        info!("CycleScheduler: started successfully");
        Ok(())
    }

    /// Stop the scheduler
    pub async fn stop(&self) {
        let mut handle = self.handle.write().await;
        if let Some(h) = handle.take() {
            h.abort();
            info!("CycleScheduler: stopped");
        }
    }

    /// Check if the scheduler is running
    pub async fn is_running(&self) -> bool {
        let handle = self.handle.read().await;
        handle.is_some()
    }
}

fn next_delay(schedule: &Schedule, now: DateTime<Utc>) -> Option<Duration> {
    let next_tick = schedule.after(&now).next()?;
    Some((next_tick - now).to_std().unwrap_or_default())
}
