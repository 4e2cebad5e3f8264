//! Configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates every section.
//! Configuration is loaded from a TOML file; every field has a default, so an
//! empty file is valid.
//!
//! # Example
//!
//! ```no_run
//! use sync_orchestrator::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("sync.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::backoff::BackoffConfig;
use super::health::HealthConfig;
use super::logging::LoggingConfig;
use super::sync::SyncConfig;
use crate::application::synchronization::builder::ManagerOptions;
use crate::error::{ConfigError, Result};

/// Orchestrator configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    /// Streaming switch, client key and queue sizing.
    #[serde(default)]
    pub sync: SyncConfig,

    /// Reconnect backoff of the streaming path.
    #[serde(default)]
    pub backoff: BackoffConfig,

    /// Watchdog tolerances.
    #[serde(default)]
    pub health: HealthConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Validate every section.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        self.sync.validate()?;
        self.backoff.validate()?;
        self.health.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Initialize the global tracing subscriber.
    pub fn init_logging(&self) {
        if !self.logging.init() {
            tracing::debug!("Tracing subscriber already installed, keeping it");
        }
    }

    /// Options for the synchronization manager.
    #[must_use]
    pub fn to_manager_options(&self) -> ManagerOptions {
        ManagerOptions {
            streaming_enabled: self.sync.streaming_enabled,
            client_key: self.sync.client_key.clone(),
            status_event_capacity: self.sync.status_event_capacity,
            backoff: self.backoff.to_settings(),
            health: self.health.to_settings(),
        }
    }
}
