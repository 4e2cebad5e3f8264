//! Builder for [`SyncManager`].
//!
//! Validates every precondition up front so a manager is either fully wired
//! or not built at all.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tracing::debug;

use super::backoff::BackoffSettings;
use super::health::{HealthBridge, HealthSettings};
use super::manager::{ManagerParts, Streaming, SyncManager};
use super::mode::ModeController;
use super::status::StatusQueue;
use crate::error::{ConfigError, Result};
use crate::port::outbound::health::HealthMonitor;
use crate::port::outbound::push::{PushManager, PushManagerContext, PushManagerFactory};
use crate::port::outbound::synchronizer::Synchronizer;
use crate::port::outbound::telemetry::TelemetryRecorder;

/// Default capacity of the push status event queue.
pub const DEFAULT_STATUS_EVENT_CAPACITY: usize = 1000;

/// Length every client key must have.
pub const CLIENT_KEY_LEN: usize = 4;

/// Tunables for a [`SyncManager`].
#[derive(Debug, Clone, PartialEq)]
pub struct ManagerOptions {
    /// Use the push channel when available; otherwise poll only.
    pub streaming_enabled: bool,
    /// Optional short identifier forwarded to the push manager.
    pub client_key: Option<String>,
    /// Capacity of the push status event queue.
    pub status_event_capacity: usize,
    pub backoff: BackoffSettings,
    pub health: HealthSettings,
}

impl Default for ManagerOptions {
    fn default() -> Self {
        Self {
            streaming_enabled: true,
            client_key: None,
            status_event_capacity: DEFAULT_STATUS_EVENT_CAPACITY,
            backoff: BackoffSettings::default(),
            health: HealthSettings::default(),
        }
    }
}

impl ManagerOptions {
    /// Check option values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero event capacity, a
    /// malformed client key while streaming, or invalid backoff settings.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.status_event_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "sync.status_event_capacity",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.streaming_enabled {
            if let Some(key) = &self.client_key {
                if key.chars().count() != CLIENT_KEY_LEN {
                    return Err(ConfigError::InvalidValue {
                        field: "sync.client_key",
                        reason: format!("must be exactly {CLIENT_KEY_LEN} characters"),
                    });
                }
            }
        }
        self.backoff.validate()
    }
}

/// Builder for [`SyncManager`].
#[derive(Default)]
pub struct SyncManagerBuilder {
    options: ManagerOptions,
    synchronizer: Option<Arc<dyn Synchronizer>>,
    push_factory: Option<PushManagerFactory>,
    health_monitor: Option<Arc<dyn HealthMonitor>>,
    telemetry: Option<Arc<dyn TelemetryRecorder>>,
    status_queue: Option<StatusQueue>,
}

impl SyncManagerBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn options(mut self, options: ManagerOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn synchronizer(mut self, synchronizer: Arc<dyn Synchronizer>) -> Self {
        self.synchronizer = Some(synchronizer);
        self
    }

    /// Set the push manager factory.
    ///
    /// Called once during [`build`](Self::build) with the sender of the
    /// status event queue. Ignored when streaming is disabled.
    #[must_use]
    pub fn push_manager<F>(mut self, factory: F) -> Self
    where
        F: FnOnce(PushManagerContext) -> Result<Arc<dyn PushManager>> + Send + 'static,
    {
        self.push_factory = Some(Box::new(factory));
        self
    }

    #[must_use]
    pub fn health_monitor(mut self, monitor: Arc<dyn HealthMonitor>) -> Self {
        self.health_monitor = Some(monitor);
        self
    }

    #[must_use]
    pub fn telemetry(mut self, telemetry: Arc<dyn TelemetryRecorder>) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    /// Set the queue receiving one [`ManagerStatus`](crate::domain::status::ManagerStatus)
    /// per start attempt.
    #[must_use]
    pub fn status_queue(mut self, queue: StatusQueue) -> Self {
        self.status_queue = Some(queue);
        self
    }

    /// Build the manager.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when a required collaborator is
    /// absent, [`ConfigError::InvalidValue`] for invalid options, or whatever
    /// the push manager factory returns.
    pub fn build(self) -> Result<SyncManager> {
        let status = self
            .status_queue
            .ok_or(ConfigError::MissingField {
                field: "status_queue",
            })?;
        let synchronizer = self.synchronizer.ok_or(ConfigError::MissingField {
            field: "synchronizer",
        })?;
        let health_monitor = self.health_monitor.ok_or(ConfigError::MissingField {
            field: "health_monitor",
        })?;
        let telemetry = self.telemetry.ok_or(ConfigError::MissingField {
            field: "telemetry",
        })?;
        self.options.validate()?;

        let streaming = if self.options.streaming_enabled {
            let factory = self.push_factory.ok_or(ConfigError::MissingField {
                field: "push_manager",
            })?;
            let (status_tx, events) = mpsc::channel(self.options.status_event_capacity);
            let push = factory(PushManagerContext {
                status_tx,
                client_key: self.options.client_key.clone(),
            })?;
            Streaming::Enabled {
                push,
                events: Arc::new(Mutex::new(events)),
            }
        } else {
            Streaming::Disabled
        };

        let controller = Arc::new(ModeController::new(
            Arc::clone(&synchronizer),
            streaming.push(),
            telemetry,
            HealthBridge::new(health_monitor, self.options.health.clone()),
        ));

        debug!(
            streaming_enabled = self.options.streaming_enabled,
            status_event_capacity = self.options.status_event_capacity,
            "Sync manager built"
        );

        Ok(SyncManager::from_parts(ManagerParts {
            synchronizer,
            streaming,
            controller,
            status,
            backoff: self.options.backoff,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::testkit::health::RecordingHealthMonitor;
    use crate::testkit::push::ScriptedPushManager;
    use crate::testkit::synchronizer::RecordingSynchronizer;
    use crate::testkit::telemetry::RecordingTelemetry;

    fn complete() -> SyncManagerBuilder {
        SyncManager::builder()
            .synchronizer(Arc::new(RecordingSynchronizer::new()))
            .health_monitor(Arc::new(RecordingHealthMonitor::new()))
            .telemetry(Arc::new(RecordingTelemetry::new()))
            .status_queue(StatusQueue::new(1).unwrap())
            .push_manager(|_ctx| Ok(Arc::new(ScriptedPushManager::new()) as _))
    }

    fn missing_field(result: Result<SyncManager>) -> &'static str {
        match result {
            Err(Error::Config(ConfigError::MissingField { field })) => field,
            Err(other) => panic!("expected missing field, got {other}"),
            Ok(_) => panic!("expected missing field, got a manager"),
        }
    }

    fn invalid_field(result: Result<SyncManager>) -> &'static str {
        match result {
            Err(Error::Config(ConfigError::InvalidValue { field, .. })) => field,
            Err(other) => panic!("expected invalid value, got {other}"),
            Ok(_) => panic!("expected invalid value, got a manager"),
        }
    }

    #[test]
    fn test_complete_builder_succeeds() {
        let manager = complete().build().unwrap();
        assert!(manager.is_streaming_enabled());
        assert!(!manager.is_running());
    }

    #[test]
    fn test_missing_status_queue_is_rejected() {
        let builder = SyncManagerBuilder {
            status_queue: None,
            ..complete()
        };
        assert_eq!(missing_field(builder.build()), "status_queue");
    }

    #[test]
    fn test_missing_synchronizer_is_rejected() {
        let builder = SyncManagerBuilder {
            synchronizer: None,
            ..complete()
        };
        assert_eq!(missing_field(builder.build()), "synchronizer");
    }

    #[test]
    fn test_streaming_without_push_factory_is_rejected() {
        let builder = SyncManagerBuilder {
            push_factory: None,
            ..complete()
        };
        assert_eq!(missing_field(builder.build()), "push_manager");
    }

    #[test]
    fn test_polling_only_does_not_need_push_factory() {
        let builder = SyncManagerBuilder {
            push_factory: None,
            ..complete()
        }
        .options(ManagerOptions {
            streaming_enabled: false,
            ..ManagerOptions::default()
        });
        let manager = builder.build().unwrap();
        assert!(!manager.is_streaming_enabled());
    }

    #[test]
    fn test_client_key_must_have_four_characters() {
        let options = ManagerOptions {
            client_key: Some("abc".to_string()),
            ..ManagerOptions::default()
        };
        assert_eq!(
            invalid_field(complete().options(options).build()),
            "sync.client_key"
        );

        let options = ManagerOptions {
            client_key: Some("äbcd".to_string()),
            ..ManagerOptions::default()
        };
        assert!(complete().options(options).build().is_ok());
    }

    #[test]
    fn test_client_key_ignored_when_polling_only() {
        let options = ManagerOptions {
            streaming_enabled: false,
            client_key: Some("toolong".to_string()),
            ..ManagerOptions::default()
        };
        assert!(complete().options(options).build().is_ok());
    }

    #[test]
    fn test_zero_event_capacity_is_rejected() {
        let options = ManagerOptions {
            status_event_capacity: 0,
            ..ManagerOptions::default()
        };
        assert_eq!(
            invalid_field(complete().options(options).build()),
            "sync.status_event_capacity"
        );
    }

    #[test]
    fn test_factory_receives_client_key() {
        let (seen_tx, seen_rx) = std::sync::mpsc::channel();
        let options = ManagerOptions {
            client_key: Some("ab12".to_string()),
            ..ManagerOptions::default()
        };
        complete()
            .options(options)
            .push_manager(move |ctx| {
                seen_tx.send(ctx.client_key).unwrap();
                Ok(Arc::new(ScriptedPushManager::new()) as _)
            })
            .build()
            .unwrap();

        assert_eq!(seen_rx.recv().unwrap(), Some("ab12".to_string()));
    }

    #[test]
    fn test_factory_error_fails_build() {
        let result = complete()
            .push_manager(|_ctx| Err(Error::Push("no credentials".into())))
            .build();
        assert!(matches!(result, Err(Error::Push(_))));
    }
}
