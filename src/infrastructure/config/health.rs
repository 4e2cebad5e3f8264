//! Watchdog tolerance configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::application::synchronization::health::HealthSettings;
use crate::error::ConfigError;

/// `[health]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthConfig {
    /// Added to each fetch task's refresh interval while polling.
    #[serde(default = "default_fetch_task_tolerance_secs")]
    pub fetch_task_tolerance_secs: u64,
    /// Added to the remaining credential lifetime while streaming.
    #[serde(default = "default_refresh_token_tolerance_secs")]
    pub refresh_token_tolerance_secs: u64,
}

fn default_fetch_task_tolerance_secs() -> u64 {
    120 // 2 minutes
}

fn default_refresh_token_tolerance_secs() -> u64 {
    900 // 15 minutes
}

impl HealthConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.fetch_task_tolerance_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "health.fetch_task_tolerance_secs",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.refresh_token_tolerance_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "health.refresh_token_tolerance_secs",
                reason: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn to_settings(&self) -> HealthSettings {
        HealthSettings {
            fetch_task_tolerance: Duration::from_secs(self.fetch_task_tolerance_secs),
            refresh_token_tolerance: Duration::from_secs(self.refresh_token_tolerance_secs),
        }
    }
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            fetch_task_tolerance_secs: default_fetch_task_tolerance_secs(),
            refresh_token_tolerance_secs: default_refresh_token_tolerance_secs(),
        }
    }
}
