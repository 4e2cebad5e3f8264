//! Bounded queue used to tell the host whether a start attempt succeeded.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tracing::{debug, warn};

use crate::domain::status::ManagerStatus;
use crate::error::ConfigError;

/// Caller-supplied queue receiving one [`ManagerStatus`] per start attempt.
///
/// Cloning shares the same underlying queue. The host reads with
/// [`recv`](Self::recv); the manager writes and, while starting, drains.
#[derive(Debug, Clone)]
pub struct StatusQueue {
    tx: mpsc::Sender<ManagerStatus>,
    rx: Arc<Mutex<mpsc::Receiver<ManagerStatus>>>,
    capacity: usize,
}

impl StatusQueue {
    /// Create a queue holding up to `capacity` statuses.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "status_queue",
                reason: "capacity must be at least 1".to_string(),
            });
        }
        let (tx, rx) = mpsc::channel(capacity);
        Ok(Self {
            tx,
            rx: Arc::new(Mutex::new(rx)),
            capacity,
        })
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of statuses waiting to be read.
    #[must_use]
    pub fn len(&self) -> usize {
        self.capacity - self.tx.capacity()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Wait for the next status.
    ///
    /// Only returns `None` if every sender is gone, which cannot happen while
    /// this queue is alive.
    pub async fn recv(&self) -> Option<ManagerStatus> {
        self.rx.lock().await.recv().await
    }

    /// Take the next status without waiting.
    pub fn try_recv(&self) -> Option<ManagerStatus> {
        self.rx.try_lock().ok()?.try_recv().ok()
    }

    pub(crate) fn report(&self, status: ManagerStatus) {
        match self.tx.try_send(status) {
            Ok(()) => debug!(status = ?status, "Manager status reported"),
            Err(err) => warn!(status = ?status, error = %err, "Failed to report manager status"),
        }
    }

    /// Discard everything currently queued, without waiting.
    ///
    /// Only meaningful while the manager is `Starting`: no other writer exists
    /// then, so whatever is queued is left over from a previous attempt. If a
    /// reader is parked in [`recv`](Self::recv), the queue is empty anyway.
    pub(crate) fn drain(&self) -> usize {
        let Ok(mut rx) = self.rx.try_lock() else {
            return 0;
        };
        let mut drained = 0;
        while rx.try_recv().is_ok() {
            drained += 1;
        }
        drained
    }
}
