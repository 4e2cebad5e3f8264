//! Log-only adapters for the health and telemetry ports.
//!
//! Used when the host supplies no health monitor or telemetry sink.

use tracing::{debug, info};

use crate::domain::health::MonitoredTask;
use crate::domain::telemetry::{StreamingEvent, StreamingEventKind};
use crate::port::outbound::health::HealthMonitor;
use crate::port::outbound::telemetry::TelemetryRecorder;

/// Records streaming telemetry via tracing.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTelemetryRecorder;

impl TelemetryRecorder for LogTelemetryRecorder {
    fn record_streaming_event(&self, event: StreamingEvent) {
        match event.kind {
            StreamingEventKind::SyncMode(mode) => {
                info!(mode = %mode, timestamp = %event.timestamp, "Sync mode changed");
            }
            StreamingEventKind::StreamingStatus(status) => {
                info!(status = ?status, timestamp = %event.timestamp, "Streaming status changed");
            }
        }
    }
}

/// Logs watchdog window resets via tracing.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogHealthMonitor;

impl HealthMonitor for LogHealthMonitor {
    fn reset(&self, task: MonitoredTask, tolerance_secs: i64) {
        debug!(task = task.as_str(), tolerance_secs, "Watchdog window reset");
    }
}
