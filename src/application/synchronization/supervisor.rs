//! Supervisory tasks and session teardown.
//!
//! Exactly one supervisor is active per session: the polling supervisor when
//! streaming is disabled, the status watcher supervisor otherwise. Each runs
//! [`Teardown`] once when its session ends.

use std::sync::Arc;

use tokio::sync::{mpsc, OwnedMutexGuard};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use super::lifecycle::{Lifecycle, ShutdownSignal};
use super::watcher::StatusWatcher;
use crate::domain::status::StatusEvent;
use crate::port::outbound::push::PushManager;
use crate::port::outbound::synchronizer::Synchronizer;

/// Stops every collaborator task and completes the life-cycle.
#[derive(Clone)]
pub(crate) struct Teardown {
    lifecycle: Arc<Lifecycle>,
    synchronizer: Arc<dyn Synchronizer>,
    push: Option<Arc<dyn PushManager>>,
}

impl Teardown {
    pub(crate) fn new(
        lifecycle: Arc<Lifecycle>,
        synchronizer: Arc<dyn Synchronizer>,
        push: Option<Arc<dyn PushManager>>,
    ) -> Self {
        Self {
            lifecycle,
            synchronizer,
            push,
        }
    }

    pub(crate) async fn run(self) {
        if let Some(push) = &self.push {
            if let Err(err) = push.stop().await {
                warn!(error = %err, "Push manager failed to stop cleanly");
            }
        }
        self.synchronizer.stop_periodic_fetching();
        self.synchronizer.stop_periodic_data_recording();
        self.lifecycle.shutdown_complete();
        info!("All synchronization tasks stopped");
    }
}

/// Wait for shutdown while polling only, then tear down.
pub(crate) fn spawn_polling_supervisor(
    mut shutdown: ShutdownSignal,
    teardown: Teardown,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        shutdown.requested().await;
        teardown.run().await;
    })
}

/// Run the status watcher, then tear down however it ended.
///
/// The watcher runs on its own task so a panic inside the transition logic
/// still reaches the teardown. The event receiver guard is released when
/// that task ends, before the life-cycle completes.
pub(crate) fn spawn_status_watcher(
    watcher: StatusWatcher,
    mut events: OwnedMutexGuard<mpsc::Receiver<StatusEvent>>,
    teardown: Teardown,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let watch = tokio::spawn(async move {
            watcher.run(&mut events).await;
        });
        if let Err(err) = watch.await {
            error!(error = %err, "Status watcher terminated abnormally");
        }
        teardown.run().await;
    })
}
