//! Canonical test configurations.
//!
//! Single source of truth for option structs used across tests.

use std::time::Duration;

use crate::application::synchronization::backoff::BackoffSettings;
use crate::application::synchronization::builder::ManagerOptions;

/// Backoff with millisecond delays so retry paths finish quickly.
pub fn backoff() -> BackoffSettings {
    BackoffSettings {
        initial_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(16),
        multiplier: 2.0,
    }
}

/// Streaming enabled with a valid client key and fast backoff.
pub fn streaming() -> ManagerOptions {
    ManagerOptions {
        streaming_enabled: true,
        client_key: Some("ab12".to_string()),
        status_event_capacity: 16,
        backoff: backoff(),
        ..ManagerOptions::default()
    }
}

/// Polling only.
pub fn polling_only() -> ManagerOptions {
    ManagerOptions {
        streaming_enabled: false,
        client_key: None,
        ..streaming()
    }
}
