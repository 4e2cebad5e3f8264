//! Telemetry port for streaming events.

use crate::domain::telemetry::StreamingEvent;

/// Sink for sync-mode and streaming-status events.
///
/// Implementations must not block; recording happens on the status
/// watcher's task.
pub trait TelemetryRecorder: Send + Sync {
    fn record_streaming_event(&self, event: StreamingEvent);
}
