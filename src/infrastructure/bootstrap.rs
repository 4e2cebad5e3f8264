//! Composition root: turns a [`Config`] and host collaborators into a
//! [`SyncManager`].

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::log::{LogHealthMonitor, LogTelemetryRecorder};
use crate::application::synchronization::manager::SyncManager;
use crate::application::synchronization::status::StatusQueue;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::health::HealthMonitor;
use crate::port::outbound::push::PushManagerFactory;
use crate::port::outbound::synchronizer::Synchronizer;
use crate::port::outbound::telemetry::TelemetryRecorder;

/// Collaborators supplied by the host application.
///
/// Health monitor and telemetry fall back to log-only adapters when absent.
pub struct Collaborators {
    pub synchronizer: Arc<dyn Synchronizer>,
    pub push_manager: Option<PushManagerFactory>,
    pub health_monitor: Option<Arc<dyn HealthMonitor>>,
    pub telemetry: Option<Arc<dyn TelemetryRecorder>>,
}

impl Collaborators {
    #[must_use]
    pub fn new(synchronizer: Arc<dyn Synchronizer>) -> Self {
        Self {
            synchronizer,
            push_manager: None,
            health_monitor: None,
            telemetry: None,
        }
    }

    #[must_use]
    pub fn with_push_manager(mut self, factory: PushManagerFactory) -> Self {
        self.push_manager = Some(factory);
        self
    }

    #[must_use]
    pub fn with_health_monitor(mut self, monitor: Arc<dyn HealthMonitor>) -> Self {
        self.health_monitor = Some(monitor);
        self
    }

    #[must_use]
    pub fn with_telemetry(mut self, telemetry: Arc<dyn TelemetryRecorder>) -> Self {
        self.telemetry = Some(telemetry);
        self
    }
}

/// Build a manager from configuration.
///
/// # Errors
///
/// Returns a configuration error when the config is invalid or streaming is
/// enabled without a push manager factory.
#[allow(clippy::result_large_err)]
pub fn build_sync_manager(
    config: &Config,
    collaborators: Collaborators,
    status: StatusQueue,
) -> Result<SyncManager> {
    config.validate()?;

    let health_monitor = collaborators.health_monitor.unwrap_or_else(|| {
        info!("No health monitor supplied, logging watchdog resets");
        Arc::new(LogHealthMonitor)
    });
    let telemetry = collaborators.telemetry.unwrap_or_else(|| {
        info!("No telemetry recorder supplied, logging streaming events");
        Arc::new(LogTelemetryRecorder)
    });

    let mut builder = SyncManager::builder()
        .options(config.to_manager_options())
        .synchronizer(collaborators.synchronizer)
        .health_monitor(health_monitor)
        .telemetry(telemetry)
        .status_queue(status);
    if let Some(factory) = collaborators.push_manager {
        builder = builder.push_manager(factory);
    }

    let manager = builder.build()?;
    info!(
        streaming_enabled = manager.is_streaming_enabled(),
        "Sync manager ready to start"
    );
    Ok(manager)
}
