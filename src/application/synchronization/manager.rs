//! Synchronization manager facade.
//!
//! Public entry point of the orchestrator. [`SyncManager::start`] runs the
//! initial full synchronization, reports readiness, and hands control to
//! either the polling supervisor or the status watcher.
//! [`SyncManager::stop`] requests shutdown and waits for teardown; while a
//! start is still in progress it only cancels that start and returns.
//!
//! Lifecycle races (double start, double stop, stop before start) are
//! resolved as logged no-ops, never as errors.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tracing::{debug, error, info, warn};

use super::backoff::{Backoff, BackoffSettings};
use super::builder::SyncManagerBuilder;
use super::lifecycle::{Lifecycle, ManagerState};
use super::mode::ModeController;
use super::status::StatusQueue;
use super::supervisor::{self, Teardown};
use super::watcher::StatusWatcher;
use crate::domain::mode::OperationMode;
use crate::domain::status::{ManagerStatus, StatusEvent};
use crate::port::outbound::push::PushManager;
use crate::port::outbound::synchronizer::Synchronizer;

/// Whether the push channel exists for this manager.
pub(super) enum Streaming {
    Disabled,
    Enabled {
        push: Arc<dyn PushManager>,
        events: Arc<Mutex<mpsc::Receiver<StatusEvent>>>,
    },
}

impl Streaming {
    pub(super) fn push(&self) -> Option<Arc<dyn PushManager>> {
        match self {
            Self::Disabled => None,
            Self::Enabled { push, .. } => Some(Arc::clone(push)),
        }
    }
}

/// Collaborators assembled by [`SyncManagerBuilder`].
pub(super) struct ManagerParts {
    pub(super) synchronizer: Arc<dyn Synchronizer>,
    pub(super) streaming: Streaming,
    pub(super) controller: Arc<ModeController>,
    pub(super) status: StatusQueue,
    pub(super) backoff: BackoffSettings,
}

struct ManagerInner {
    lifecycle: Arc<Lifecycle>,
    synchronizer: Arc<dyn Synchronizer>,
    streaming: Streaming,
    controller: Arc<ModeController>,
    status: StatusQueue,
    backoff: BackoffSettings,
}

/// Keeps the local dataset in sync by switching between streaming and polling.
///
/// Cheap to clone; clones drive the same orchestrator.
#[derive(Clone)]
pub struct SyncManager {
    inner: Arc<ManagerInner>,
}

impl SyncManager {
    #[must_use]
    pub fn builder() -> SyncManagerBuilder {
        SyncManagerBuilder::new()
    }

    pub(super) fn from_parts(parts: ManagerParts) -> Self {
        Self {
            inner: Arc::new(ManagerInner {
                lifecycle: Arc::new(Lifecycle::new()),
                synchronizer: parts.synchronizer,
                streaming: parts.streaming,
                controller: parts.controller,
                status: parts.status,
                backoff: parts.backoff,
            }),
        }
    }

    /// True while the manager is fully started and not stopping.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.inner.lifecycle.is_running()
    }

    #[must_use]
    pub fn state(&self) -> ManagerState {
        self.inner.lifecycle.state()
    }

    /// Strategy currently authoritative for updates.
    #[must_use]
    pub fn operation_mode(&self) -> OperationMode {
        self.inner.controller.mode()
    }

    #[must_use]
    pub fn is_streaming_enabled(&self) -> bool {
        matches!(self.inner.streaming, Streaming::Enabled { .. })
    }

    /// Start synchronization.
    ///
    /// Returns once the initial full synchronization finished and the
    /// background supervisor is running. The outcome is reported on the
    /// status queue: [`ManagerStatus::Ready`] or [`ManagerStatus::Error`].
    pub async fn start(&self) {
        let inner = &self.inner;
        if !inner.lifecycle.begin_initialization() {
            info!("Manager is already running, skipping start");
            return;
        }

        // While Starting nobody else writes to the status queue or the mode,
        // so anything left there belongs to a previous attempt.
        inner.controller.reset();
        let stale = inner.status.drain();
        if stale > 0 {
            debug!(stale, "Discarded stale manager statuses");
        }

        if let Err(err) = inner.synchronizer.sync_all(false).await {
            error!(error = %err, "Initial synchronization failed");
            inner.status.report(ManagerStatus::Error);
            inner.lifecycle.shutdown_complete();
            return;
        }

        if !inner.lifecycle.initialization_complete() {
            info!("Shutdown requested during start, not starting workers");
            inner.lifecycle.shutdown_complete();
            return;
        }

        debug!("Initial synchronization complete");
        inner.status.report(ManagerStatus::Ready);
        inner.synchronizer.start_periodic_data_recording();

        let shutdown = inner.lifecycle.shutdown_requested();
        let teardown = Teardown::new(
            Arc::clone(&inner.lifecycle),
            Arc::clone(&inner.synchronizer),
            inner.streaming.push(),
        );

        match &inner.streaming {
            Streaming::Disabled => {
                info!("Synchronization initialized in polling mode");
                inner.controller.start_polling();
                supervisor::spawn_polling_supervisor(shutdown, teardown);
            }
            Streaming::Enabled { push, events } => {
                info!("Synchronization initialized in streaming mode");
                // The previous session's watcher released this guard before
                // its teardown completed the life-cycle.
                let mut events = Arc::clone(events).lock_owned().await;
                let mut stale = 0;
                while events.try_recv().is_ok() {
                    stale += 1;
                }
                if stale > 0 {
                    debug!(stale, "Discarded stale status events");
                }

                if let Err(err) = push.start().await {
                    warn!(error = %err, "Push manager failed to start, polling until it reports status");
                    inner.controller.start_polling();
                }

                let watcher = StatusWatcher::new(
                    Arc::clone(&inner.controller),
                    Arc::clone(&inner.synchronizer),
                    Backoff::new(inner.backoff.clone()),
                    shutdown,
                );
                supervisor::spawn_status_watcher(watcher, events, teardown);
            }
        }
    }

    /// Stop synchronization and wait until every task has exited.
    ///
    /// A no-op when the manager is not running. Called during a start, it
    /// cancels that start without waiting for the initial synchronization.
    /// There is no timeout: a backoff wait in progress finishes before
    /// teardown runs.
    pub async fn stop(&self) {
        let Some(cycle) = self.inner.lifecycle.begin_shutdown_cycle() else {
            info!(state = %self.state(), "Sync manager not yet running, skipping shutdown");
            return;
        };
        info!("Stopping all synchronization tasks");
        self.inner.lifecycle.await_cycle_complete(cycle).await;
    }
}
