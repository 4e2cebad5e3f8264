//! Mode controller: switches between polling and streaming.
//!
//! Holds the current [`OperationMode`] and performs the side effects of each
//! switch: starting/stopping periodic fetching, pausing/resuming push
//! workers, telemetry, and watchdog windows. Callers follow a single-writer
//! discipline (the start path, then the status watcher), so mode writes
//! never race.

use std::sync::Arc;

use tracing::{info, warn};

use super::health::HealthBridge;
use crate::domain::mode::{ModeCell, OperationMode};
use crate::domain::telemetry::{StreamingEvent, StreamingStatus};
use crate::port::outbound::push::PushManager;
use crate::port::outbound::synchronizer::Synchronizer;
use crate::port::outbound::telemetry::TelemetryRecorder;

pub struct ModeController {
    mode: ModeCell,
    synchronizer: Arc<dyn Synchronizer>,
    push: Option<Arc<dyn PushManager>>,
    telemetry: Arc<dyn TelemetryRecorder>,
    health: HealthBridge,
}

impl ModeController {
    pub fn new(
        synchronizer: Arc<dyn Synchronizer>,
        push: Option<Arc<dyn PushManager>>,
        telemetry: Arc<dyn TelemetryRecorder>,
        health: HealthBridge,
    ) -> Self {
        Self {
            mode: ModeCell::default(),
            synchronizer,
            push,
            telemetry,
            health,
        }
    }

    #[must_use]
    pub fn mode(&self) -> OperationMode {
        self.mode.load()
    }

    /// Forget the previous session's mode. No side effects.
    pub fn reset(&self) {
        self.mode.store(OperationMode::Polling);
    }

    /// Make periodic fetching authoritative.
    ///
    /// Any running fetch schedule is stopped first so repeated calls never
    /// leave two schedules behind.
    pub fn start_polling(&self) {
        self.synchronizer.stop_periodic_fetching();
        self.mode.store(OperationMode::Polling);
        self.synchronizer.start_periodic_fetching();
        self.telemetry
            .record_streaming_event(StreamingEvent::sync_mode(OperationMode::Polling));
        self.health
            .reset_for_polling(self.synchronizer.refresh_rates());
        info!(mode = %OperationMode::Polling, "Periodic fetching started");
    }

    pub fn stop_polling(&self) {
        self.synchronizer.stop_periodic_fetching();
    }

    /// Make the push channel authoritative.
    ///
    /// Resumes push workers and sizes the watchdog windows from the remaining
    /// credential lifetime.
    pub fn enable_streaming(&self) {
        let Some(push) = &self.push else {
            warn!("Streaming requested without a push manager, staying in polling mode");
            return;
        };
        push.start_workers();
        self.mode.store(OperationMode::Streaming);
        self.telemetry
            .record_streaming_event(StreamingEvent::sync_mode(OperationMode::Streaming));
        self.telemetry
            .record_streaming_event(StreamingEvent::streaming_status(StreamingStatus::Enabled));
        self.health.reset_for_streaming(push.next_refresh());
        info!(mode = %OperationMode::Streaming, "Streaming enabled");
    }

    /// Stop consuming push notifications, keeping the connection managed.
    pub fn pause_streaming(&self) {
        if let Some(push) = &self.push {
            push.stop_workers();
        }
        self.telemetry
            .record_streaming_event(StreamingEvent::streaming_status(StreamingStatus::Paused));
    }

    /// Shut the push manager down entirely.
    pub async fn stop_streaming(&self) {
        if let Some(push) = &self.push {
            if let Err(err) = push.stop().await {
                warn!(error = %err, "Push manager failed to stop cleanly");
            }
        }
    }

    /// Start the push manager again after a retryable failure.
    pub async fn restart_streaming(&self) {
        if let Some(push) = &self.push {
            if let Err(err) = push.start().await {
                warn!(error = %err, "Push manager failed to restart, remaining in polling mode");
            }
        }
    }

    /// Record that streaming is off for the rest of the session.
    pub fn disable_streaming(&self) {
        self.telemetry
            .record_streaming_event(StreamingEvent::streaming_status(StreamingStatus::Disabled));
    }
}
