//! Streaming and status queue configuration.

use serde::Deserialize;

use crate::application::synchronization::builder::{CLIENT_KEY_LEN, DEFAULT_STATUS_EVENT_CAPACITY};
use crate::error::ConfigError;

/// `[sync]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SyncConfig {
    /// Use the push channel; when false the manager only polls.
    #[serde(default = "default_streaming_enabled")]
    pub streaming_enabled: bool,
    /// Optional 4-character client identifier passed to the push manager.
    #[serde(default)]
    pub client_key: Option<String>,
    /// Capacity of the push status event queue.
    #[serde(default = "default_status_event_capacity")]
    pub status_event_capacity: usize,
}

fn default_streaming_enabled() -> bool {
    true
}

fn default_status_event_capacity() -> usize {
    DEFAULT_STATUS_EVENT_CAPACITY
}

impl SyncConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.status_event_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "sync.status_event_capacity",
                reason: "must be greater than 0".to_string(),
            });
        }
        if let (true, Some(key)) = (self.streaming_enabled, &self.client_key) {
            if key.chars().count() != CLIENT_KEY_LEN {
                return Err(ConfigError::InvalidValue {
                    field: "sync.client_key",
                    reason: format!("must be exactly {CLIENT_KEY_LEN} characters"),
                });
            }
        }
        Ok(())
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            streaming_enabled: default_streaming_enabled(),
            client_key: None,
            status_event_capacity: default_status_event_capacity(),
        }
    }
}
