use std::sync::Arc;

use chrono::Utc;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};

use crate::config::SchedulerConfig;

use super::report_runner::ReportRunner;

/// Background sweep of scheduled reports
///
/// Ticks every `REPORT_SWEEP_INTERVAL_SECS`, the first tick firing at start.
/// A sweep that outlasts the interval delays the next tick rather than
/// stacking runs. Only one instance should run per deployment; the due check
/// alone does not stop two processes from sending the same report.
pub struct ReportScheduler {
    runner: Arc<ReportRunner>,
    config: SchedulerConfig,
}

impl ReportScheduler {
    pub fn new(runner: Arc<ReportRunner>, config: SchedulerConfig) -> Self {
        Self { runner, config }
    }

    /// Spawn with `tokio::spawn` from main.rs; never returns
    pub async fn start(self: Arc<Self>) {
        info!(
            interval_secs = self.config.sweep_interval_secs,
            "Starting scheduled report sweep"
        );

        let mut ticker = interval(self.config.interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            self.tick().await;
        }
    }

    async fn tick(&self) {
        match self.runner.run_sweep(Utc::now()).await {
            Ok(summary) => {
                if summary.failed > 0 {
                    error!(
                        processed = summary.processed,
                        failed = summary.failed,
                        total = summary.total,
                        "Scheduled report sweep had failures"
                    );
                }
            }
            Err(e) => {
                error!(error = %e, "Scheduled report sweep aborted");
            }
        }
    }
}
