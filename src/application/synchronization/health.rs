//! Bridge between mode changes and the external health monitor.
//!
//! Whenever the authoritative strategy changes, both fetch tasks get a fresh
//! watchdog window sized for that strategy, so a window computed for the
//! previous mode never survives the switch.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::health::{MonitoredTask, RefreshRates, ToleranceWindow};
use crate::port::outbound::health::HealthMonitor;

/// Tolerances added on top of the mode-specific window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthSettings {
    /// Added to each task's refresh interval while polling.
    pub fetch_task_tolerance: Duration,
    /// Added to the remaining credential lifetime while streaming.
    pub refresh_token_tolerance: Duration,
}

impl Default for HealthSettings {
    fn default() -> Self {
        Self {
            fetch_task_tolerance: Duration::from_secs(2 * 60),
            refresh_token_tolerance: Duration::from_secs(15 * 60),
        }
    }
}

pub struct HealthBridge {
    monitor: Arc<dyn HealthMonitor>,
    settings: HealthSettings,
}

impl HealthBridge {
    pub fn new(monitor: Arc<dyn HealthMonitor>, settings: HealthSettings) -> Self {
        Self { monitor, settings }
    }

    /// Size both windows for periodic fetching at the given rates.
    pub fn reset_for_polling(&self, rates: RefreshRates) {
        for task in MonitoredTask::ALL {
            let window =
                ToleranceWindow::polling(self.settings.fetch_task_tolerance, rates.for_task(task));
            self.reset(task, window);
        }
    }

    /// Size both windows for streaming until the credential refresh at
    /// `next_refresh`.
    pub fn reset_for_streaming(&self, next_refresh: DateTime<Utc>) {
        self.reset_for_streaming_at(next_refresh, Utc::now());
    }

    fn reset_for_streaming_at(&self, next_refresh: DateTime<Utc>, now: DateTime<Utc>) {
        // An already expired credential leaves only the tolerance.
        let remaining = (next_refresh - now).to_std().unwrap_or(Duration::ZERO);
        let window = ToleranceWindow::streaming(remaining, self.settings.refresh_token_tolerance);
        for task in MonitoredTask::ALL {
            self.reset(task, window);
        }
    }

    fn reset(&self, task: MonitoredTask, window: ToleranceWindow) {
        debug!(
            task = task.as_str(),
            tolerance_secs = window.as_secs(),
            "Resetting watchdog window"
        );
        self.monitor.reset(task, window.as_secs());
    }
}
