//! A fully wired manager over testkit collaborators.

use std::sync::Arc;
use std::time::Duration;

use sync_orchestrator::application::synchronization::builder::ManagerOptions;
use sync_orchestrator::application::synchronization::manager::SyncManager;
use sync_orchestrator::application::synchronization::status::StatusQueue;
use sync_orchestrator::domain::status::ManagerStatus;
use sync_orchestrator::testkit::config;
use sync_orchestrator::testkit::health::RecordingHealthMonitor;
use sync_orchestrator::testkit::push::{PushHandle, ScriptedPushManager};
use sync_orchestrator::testkit::synchronizer::RecordingSynchronizer;
use sync_orchestrator::testkit::telemetry::RecordingTelemetry;

pub struct Harness {
    pub manager: SyncManager,
    pub status: StatusQueue,
    pub synchronizer: Arc<RecordingSynchronizer>,
    pub push: PushHandle,
    pub telemetry: Arc<RecordingTelemetry>,
    pub health: Arc<RecordingHealthMonitor>,
}

impl Harness {
    pub fn streaming() -> Self {
        Self::build(
            config::streaming(),
            RecordingSynchronizer::new(),
            ScriptedPushManager::new(),
        )
    }

    pub fn polling_only() -> Self {
        Self::build(
            config::polling_only(),
            RecordingSynchronizer::new(),
            ScriptedPushManager::new(),
        )
    }

    pub fn build(
        options: ManagerOptions,
        synchronizer: RecordingSynchronizer,
        push: ScriptedPushManager,
    ) -> Self {
        let synchronizer = Arc::new(synchronizer);
        let telemetry = Arc::new(RecordingTelemetry::new());
        let health = Arc::new(RecordingHealthMonitor::new());
        let status = StatusQueue::new(4).expect("valid capacity");
        let (factory, push) = push.into_factory();

        let manager = SyncManager::builder()
            .options(options)
            .synchronizer(synchronizer.clone())
            .push_manager(factory)
            .health_monitor(health.clone())
            .telemetry(telemetry.clone())
            .status_queue(status.clone())
            .build()
            .expect("complete builder");

        Self {
            manager,
            status,
            synchronizer,
            push,
            telemetry,
            health,
        }
    }

    pub fn push_manager(&self) -> Arc<ScriptedPushManager> {
        self.push.manager()
    }

    /// Next manager status, failing the test after one second.
    pub async fn next_status(&self) -> ManagerStatus {
        tokio::time::timeout(Duration::from_secs(1), self.status.recv())
            .await
            .expect("status within 1s")
            .expect("status queue open")
    }

    /// Start and assert the manager reported `Ready`.
    pub async fn start_ready(&self) {
        self.manager.start().await;
        assert_eq!(self.next_status().await, ManagerStatus::Ready);
        assert!(self.manager.is_running());
    }

    /// Stop, failing the test if teardown takes longer than one second.
    pub async fn stop(&self) {
        tokio::time::timeout(Duration::from_secs(1), self.manager.stop())
            .await
            .expect("stop within 1s");
    }
}
