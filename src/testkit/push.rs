//! Scripted [`PushManager`] and a handle for injecting status events.
//!
//! - [`ScriptedPushManager`] counts every call and returns scripted `start`
//!   results. Best for: unit tests of the mode controller and watcher.
//!
//! - [`PushHandle`] comes with [`ScriptedPushManager::into_factory`] and
//!   holds the status sender the manager was built with. Best for: driving a
//!   full [`SyncManager`](crate::application::synchronization::manager::SyncManager)
//!   through status events.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::domain::status::StatusEvent;
use crate::error::Result;
use crate::port::outbound::push::{PushManager, PushManagerContext};

pub struct ScriptedPushManager {
    next_refresh: DateTime<Utc>,
    start_results: Mutex<VecDeque<Result<()>>>,
    start_count: AtomicU32,
    stop_count: AtomicU32,
    start_workers_count: AtomicU32,
    stop_workers_count: AtomicU32,
}

impl ScriptedPushManager {
    /// Credential refresh due in one hour.
    pub fn new() -> Self {
        Self {
            next_refresh: Utc::now() + Duration::hours(1),
            start_results: Mutex::new(VecDeque::new()),
            start_count: AtomicU32::new(0),
            stop_count: AtomicU32::new(0),
            start_workers_count: AtomicU32::new(0),
            stop_workers_count: AtomicU32::new(0),
        }
    }

    pub fn with_next_refresh(mut self, next_refresh: DateTime<Utc>) -> Self {
        self.next_refresh = next_refresh;
        self
    }

    pub fn with_start_results(self, results: Vec<Result<()>>) -> Self {
        *self.start_results.lock() = results.into();
        self
    }

    /// Turn this manager into a factory for
    /// [`SyncManagerBuilder::push_manager`](crate::application::synchronization::builder::SyncManagerBuilder::push_manager).
    pub fn into_factory(
        self,
    ) -> (
        impl FnOnce(PushManagerContext) -> Result<Arc<dyn PushManager>> + Send + 'static,
        PushHandle,
    ) {
        let handle = PushHandle {
            manager: Arc::new(self),
            context: Arc::new(Mutex::new(None)),
        };
        let manager = Arc::clone(&handle.manager);
        let context = Arc::clone(&handle.context);
        let factory = move |ctx: PushManagerContext| {
            *context.lock() = Some(ctx);
            Ok(manager as Arc<dyn PushManager>)
        };
        (factory, handle)
    }

    pub fn start_count(&self) -> u32 {
        self.start_count.load(Ordering::SeqCst)
    }

    pub fn stop_count(&self) -> u32 {
        self.stop_count.load(Ordering::SeqCst)
    }

    pub fn start_workers_count(&self) -> u32 {
        self.start_workers_count.load(Ordering::SeqCst)
    }

    pub fn stop_workers_count(&self) -> u32 {
        self.stop_workers_count.load(Ordering::SeqCst)
    }
}

impl Default for ScriptedPushManager {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PushManager for ScriptedPushManager {
    async fn start(&self) -> Result<()> {
        self.start_count.fetch_add(1, Ordering::SeqCst);
        self.start_results.lock().pop_front().unwrap_or(Ok(()))
    }

    async fn stop(&self) -> Result<()> {
        self.stop_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn start_workers(&self) {
        self.start_workers_count.fetch_add(1, Ordering::SeqCst);
    }

    fn stop_workers(&self) {
        self.stop_workers_count.fetch_add(1, Ordering::SeqCst);
    }

    fn next_refresh(&self) -> DateTime<Utc> {
        self.next_refresh
    }
}

/// External control over a [`ScriptedPushManager`] built through a factory.
#[derive(Clone)]
pub struct PushHandle {
    manager: Arc<ScriptedPushManager>,
    context: Arc<Mutex<Option<PushManagerContext>>>,
}

impl PushHandle {
    pub fn manager(&self) -> Arc<ScriptedPushManager> {
        Arc::clone(&self.manager)
    }

    /// Client key the factory was called with.
    pub fn client_key(&self) -> Option<String> {
        self.context.lock().as_ref()?.client_key.clone()
    }

    /// Emit a status event the way a real push manager would.
    ///
    /// # Panics
    ///
    /// Panics if the factory has not been called yet or the queue is closed.
    pub async fn emit(&self, event: StatusEvent) {
        let tx: mpsc::Sender<StatusEvent> = self
            .context
            .lock()
            .as_ref()
            .map(|ctx| ctx.status_tx.clone())
            .expect("push manager factory not called yet");
        tx.send(event).await.expect("status event queue closed");
    }
}
