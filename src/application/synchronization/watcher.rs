//! Status watcher: applies the mode-transition policy.
//!
//! Once streaming is enabled, this task is the only writer of the operation
//! mode. It processes push status events one at a time, in arrival order,
//! until shutdown is requested.
//!
//! | Event               | Effect                                              |
//! |---------------------|-----------------------------------------------------|
//! | `Up`                | stop polling, enable streaming, full resync         |
//! | `Down`              | resync, pause push workers, start polling           |
//! | `RetryableError`    | stop push, resync, poll, wait backoff, restart push |
//! | `NonRetryableError` | stop push, resync, poll for the rest of the session |

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::backoff::Backoff;
use super::lifecycle::ShutdownSignal;
use super::mode::ModeController;
use crate::domain::status::StatusEvent;
use crate::port::outbound::synchronizer::Synchronizer;

pub(crate) struct StatusWatcher {
    controller: Arc<ModeController>,
    synchronizer: Arc<dyn Synchronizer>,
    backoff: Backoff,
    shutdown: ShutdownSignal,
    streaming_disabled: bool,
}

impl StatusWatcher {
    pub(crate) fn new(
        controller: Arc<ModeController>,
        synchronizer: Arc<dyn Synchronizer>,
        backoff: Backoff,
        shutdown: ShutdownSignal,
    ) -> Self {
        Self {
            controller,
            synchronizer,
            backoff,
            shutdown,
            streaming_disabled: false,
        }
    }

    /// Consume status events until shutdown is requested.
    pub(crate) async fn run(mut self, events: &mut mpsc::Receiver<StatusEvent>) {
        debug!("Status watcher started");
        loop {
            tokio::select! {
                biased;

                _ = self.shutdown.requested() => {
                    info!("Shutdown requested, status watcher exiting");
                    return;
                }

                event = events.recv() => {
                    match event {
                        Some(event) => self.handle(event).await,
                        None => {
                            warn!("Status event channel closed, waiting for shutdown");
                            self.shutdown.requested().await;
                            return;
                        }
                    }
                }
            }
        }
    }

    async fn handle(&mut self, event: StatusEvent) {
        if self.streaming_disabled {
            warn!(event = %event, "Streaming disabled for this session, ignoring status event");
            return;
        }

        debug!(event = %event, "Processing status event");
        match event {
            StatusEvent::Up => {
                self.controller.stop_polling();
                info!("Streaming up and running");
                self.backoff.reset();
                self.controller.enable_streaming();
                self.resync(true).await;
            }
            StatusEvent::Down => {
                info!("Streaming down, switching to polling");
                self.resync(false).await;
                self.controller.pause_streaming();
                self.controller.start_polling();
            }
            StatusEvent::RetryableError => {
                let delay = self.backoff.next_delay();
                error!(
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    attempt = self.backoff.attempt(),
                    "Retryable error in streaming subsystem, switching to polling and retrying"
                );
                self.controller.stop_streaming().await;
                self.resync(false).await;
                self.controller.start_polling();
                // Shutdown is observed once the wait is over; events queue meanwhile.
                tokio::time::sleep(delay).await;
                self.controller.restart_streaming().await;
            }
            StatusEvent::NonRetryableError => {
                error!(
                    "Non-retryable error in streaming subsystem, polling until the next start"
                );
                self.controller.stop_streaming().await;
                self.resync(false).await;
                self.controller.start_polling();
                self.controller.disable_streaming();
                self.streaming_disabled = true;
            }
        }
    }

    async fn resync(&self, with_retries: bool) {
        if let Err(err) = self.synchronizer.sync_all(with_retries).await {
            warn!(error = %err, with_retries, "Resync after mode change failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::application::synchronization::backoff::BackoffSettings;
    use crate::application::synchronization::health::{HealthBridge, HealthSettings};
    use crate::application::synchronization::lifecycle::Lifecycle;
    use crate::domain::mode::OperationMode;
    use crate::testkit::health::RecordingHealthMonitor;
    use crate::testkit::push::ScriptedPushManager;
    use crate::testkit::synchronizer::RecordingSynchronizer;
    use crate::testkit::telemetry::RecordingTelemetry;

    struct Fixture {
        lifecycle: Arc<Lifecycle>,
        controller: Arc<ModeController>,
        synchronizer: Arc<RecordingSynchronizer>,
        push: Arc<ScriptedPushManager>,
        watcher: StatusWatcher,
    }

    fn fixture(backoff: BackoffSettings) -> Fixture {
        let lifecycle = Arc::new(Lifecycle::new());
        lifecycle.begin_initialization();
        lifecycle.initialization_complete();

        let synchronizer = Arc::new(RecordingSynchronizer::new());
        let push = Arc::new(ScriptedPushManager::new());
        let controller = Arc::new(ModeController::new(
            synchronizer.clone(),
            Some(push.clone()),
            Arc::new(RecordingTelemetry::new()),
            HealthBridge::new(
                Arc::new(RecordingHealthMonitor::new()),
                HealthSettings::default(),
            ),
        ));
        let watcher = StatusWatcher::new(
            controller.clone(),
            synchronizer.clone(),
            Backoff::new(backoff),
            lifecycle.shutdown_requested(),
        );
        Fixture {
            lifecycle,
            controller,
            synchronizer,
            push,
            watcher,
        }
    }

    fn fast_backoff() -> BackoffSettings {
        BackoffSettings {
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(8),
            multiplier: 2.0,
        }
    }

    #[tokio::test]
    async fn test_up_enables_streaming_and_resyncs_with_retries() {
        let mut f = fixture(fast_backoff());
        f.watcher.handle(StatusEvent::Up).await;

        assert_eq!(f.controller.mode(), OperationMode::Streaming);
        assert_eq!(f.synchronizer.sync_calls(), vec![true]);
        assert!(!f.synchronizer.is_fetching());
    }

    #[tokio::test]
    async fn test_down_falls_back_to_polling() {
        let mut f = fixture(fast_backoff());
        f.watcher.handle(StatusEvent::Up).await;
        f.watcher.handle(StatusEvent::Down).await;

        assert_eq!(f.controller.mode(), OperationMode::Polling);
        assert_eq!(f.synchronizer.sync_calls(), vec![true, false]);
        assert!(f.synchronizer.is_fetching());
        assert_eq!(f.push.stop_workers_count(), 1);
        assert_eq!(f.push.stop_count(), 0);
    }

    #[tokio::test]
    async fn test_retryable_error_restarts_push_after_backoff() {
        let mut f = fixture(fast_backoff());
        f.watcher.handle(StatusEvent::RetryableError).await;

        assert_eq!(f.push.stop_count(), 1);
        assert_eq!(f.push.start_count(), 1);
        assert_eq!(f.synchronizer.sync_calls(), vec![false]);
        assert_eq!(f.controller.mode(), OperationMode::Polling);
        assert_eq!(f.watcher.backoff.attempt(), 1);
    }

    #[tokio::test]
    async fn test_up_resets_backoff() {
        let mut f = fixture(fast_backoff());
        f.watcher.handle(StatusEvent::RetryableError).await;
        f.watcher.handle(StatusEvent::RetryableError).await;
        assert_eq!(f.watcher.backoff.attempt(), 2);

        f.watcher.handle(StatusEvent::Up).await;
        assert_eq!(f.watcher.backoff.attempt(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retryable_error_waits_grow_and_restart_after_up() {
        let mut f = fixture(BackoffSettings {
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            multiplier: 2.0,
        });
        let mut waits = Vec::new();
        for event in [
            StatusEvent::RetryableError,
            StatusEvent::RetryableError,
            StatusEvent::Up,
            StatusEvent::RetryableError,
        ] {
            let began = tokio::time::Instant::now();
            f.watcher.handle(event).await;
            waits.push(began.elapsed().as_millis());
        }

        assert_eq!(waits, vec![1000, 2000, 0, 1000]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retryable_error_wait_is_capped() {
        let mut f = fixture(BackoffSettings {
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(3),
            multiplier: 2.0,
        });
        let mut waits = Vec::new();
        for _ in 0..4 {
            let began = tokio::time::Instant::now();
            f.watcher.handle(StatusEvent::RetryableError).await;
            waits.push(began.elapsed().as_secs());
        }

        assert_eq!(waits, vec![1, 2, 3, 3]);
    }

    #[tokio::test]
    async fn test_non_retryable_error_disables_streaming_for_session() {
        let mut f = fixture(fast_backoff());
        f.watcher.handle(StatusEvent::NonRetryableError).await;
        f.watcher.handle(StatusEvent::Up).await;
        f.watcher.handle(StatusEvent::RetryableError).await;

        assert_eq!(f.controller.mode(), OperationMode::Polling);
        assert_eq!(f.push.stop_count(), 1);
        assert_eq!(f.push.start_count(), 0);
        assert_eq!(f.push.start_workers_count(), 0);
        assert_eq!(f.synchronizer.sync_calls(), vec![false]);
    }

    #[tokio::test]
    async fn test_failed_resync_is_absorbed() {
        let mut f = fixture(fast_backoff());
        f.synchronizer
            .push_sync_result(Err(crate::error::Error::Sync("boom".into())));

        f.watcher.handle(StatusEvent::Down).await;

        assert_eq!(f.controller.mode(), OperationMode::Polling);
        assert!(f.synchronizer.is_fetching());
    }

    #[tokio::test]
    async fn test_run_processes_in_order_then_exits_on_shutdown() {
        let f = fixture(fast_backoff());
        let (tx, mut rx) = mpsc::channel(8);
        tx.send(StatusEvent::Up).await.unwrap();
        tx.send(StatusEvent::Down).await.unwrap();

        let Fixture {
            lifecycle,
            controller,
            synchronizer,
            watcher,
            ..
        } = f;
        let handle = tokio::spawn(async move {
            watcher.run(&mut rx).await;
        });

        crate::testkit::wait::until(|| {
            synchronizer.sync_calls().len() == 2 && synchronizer.is_fetching()
        })
        .await;
        assert_eq!(synchronizer.sync_calls(), vec![true, false]);
        assert_eq!(controller.mode(), OperationMode::Polling);

        lifecycle.begin_shutdown();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
    }
}
