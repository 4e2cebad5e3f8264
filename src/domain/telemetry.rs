//! Streaming telemetry records.

use chrono::{DateTime, Utc};

use super::mode::OperationMode;

/// State of the push channel as reported to telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamingStatus {
    Enabled,
    Disabled,
    Paused,
}

/// What a [`StreamingEvent`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamingEventKind {
    /// The authoritative update strategy changed.
    SyncMode(OperationMode),
    /// The push channel changed state.
    StreamingStatus(StreamingStatus),
}

/// A discrete, timestamped telemetry event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamingEvent {
    pub kind: StreamingEventKind,
    pub timestamp: DateTime<Utc>,
}

impl StreamingEvent {
    #[must_use]
    pub fn new(kind: StreamingEventKind) -> Self {
        Self {
            kind,
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn sync_mode(mode: OperationMode) -> Self {
        Self::new(StreamingEventKind::SyncMode(mode))
    }

    #[must_use]
    pub fn streaming_status(status: StreamingStatus) -> Self {
        Self::new(StreamingEventKind::StreamingStatus(status))
    }
}
