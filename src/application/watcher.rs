//! Report Watcher
//!
//! External ticker for terminal use: calls `Dashboard::report_all` on a
//! fixed interval until stopped. Adapters themselves never schedule work.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use super::dashboard::{Dashboard, SourceReport};

/// Periodically reports on every source
#[derive(Clone)]
pub struct ReportWatcher {
    dashboard: Dashboard,
    interval: Duration,
    is_running: Arc<RwLock<bool>>,
}

impl ReportWatcher {
    pub fn new(dashboard: Dashboard, interval: Duration) -> Self {
        Self {
            dashboard,
            interval,
            is_running: Arc::new(RwLock::new(false)),
        }
    }

    /// Run the report loop, passing each cycle's reports to `on_cycle`
    pub async fn run<F>(&self, mut on_cycle: F)
    where
        F: FnMut(&[SourceReport]),
    {
        *self.is_running.write().await = true;
        tracing::info!("Starting report watcher - interval: {:?}", self.interval);

        while *self.is_running.read().await {
            let reports = self.tick().await;
            on_cycle(&reports);
            self.sleep_unless_stopped().await;
        }

        tracing::info!("Report watcher stopped");
    }

    /// Execute one report cycle
    pub async fn tick(&self) -> Vec<SourceReport> {
        let reports = self.dashboard.report_all().await;
        let failed = reports.iter().filter(|r| !r.is_ok()).count();
        tracing::info!(sources = reports.len(), failed, "Report cycle complete");
        reports
    }

    /// Stop the report loop
    pub async fn stop(&self) {
        *self.is_running.write().await = false;
        tracing::info!("Stop signal sent to report watcher");
    }

    pub async fn is_running(&self) -> bool {
        *self.is_running.read().await
    }

    async fn sleep_unless_stopped(&self) {
        // Wake early so stop() takes effect without waiting a full interval
        let step = Duration::from_millis(100).min(self.interval);
        let mut slept = Duration::ZERO;
        while slept < self.interval && *self.is_running.read().await {
            tokio::time::sleep(step).await;
            slept += step;
        }
    }
}
