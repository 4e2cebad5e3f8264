//! Recording [`TelemetryRecorder`] for tests.

use parking_lot::Mutex;

use crate::domain::telemetry::{StreamingEvent, StreamingEventKind};
use crate::port::outbound::telemetry::TelemetryRecorder;

#[derive(Default)]
pub struct RecordingTelemetry {
    events: Mutex<Vec<StreamingEvent>>,
}

impl RecordingTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<StreamingEvent> {
        self.events.lock().clone()
    }

    /// Event kinds in recording order, without timestamps.
    pub fn kinds(&self) -> Vec<StreamingEventKind> {
        self.events.lock().iter().map(|event| event.kind).collect()
    }
}

impl TelemetryRecorder for RecordingTelemetry {
    fn record_streaming_event(&self, event: StreamingEvent) {
        self.events.lock().push(event);
    }
}
