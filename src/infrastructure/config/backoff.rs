//! Streaming reconnect backoff configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::application::synchronization::backoff::BackoffSettings;
use crate::error::ConfigError;

/// `[backoff]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BackoffConfig {
    /// Wait before the first push restart (milliseconds).
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    /// Upper bound for any wait (milliseconds).
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    /// Multiplier applied to the wait after each retryable error.
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
}

fn default_initial_delay_ms() -> u64 {
    1_000 // 1 second
}

fn default_max_delay_ms() -> u64 {
    1_800_000 // 30 minutes
}

fn default_multiplier() -> f64 {
    2.0
}

impl BackoffConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_delay_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "backoff.initial_delay_ms",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.max_delay_ms < self.initial_delay_ms {
            return Err(ConfigError::InvalidValue {
                field: "backoff.max_delay_ms",
                reason: "must be >= initial_delay_ms".to_string(),
            });
        }
        self.to_settings().validate()
    }

    #[must_use]
    pub fn to_settings(&self) -> BackoffSettings {
        BackoffSettings {
            initial_delay: Duration::from_millis(self.initial_delay_ms),
            max_delay: Duration::from_millis(self.max_delay_ms),
            multiplier: self.multiplier,
        }
    }
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            multiplier: default_multiplier(),
        }
    }
}
