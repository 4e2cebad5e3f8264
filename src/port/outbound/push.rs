//! Push manager port for the streaming channel.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

use crate::domain::status::StatusEvent;
use crate::error::Result;

/// Client of the persistent push connection.
///
/// Owns the connection, authentication and token refresh. Reports its
/// coarse state as [`StatusEvent`]s on the sender it was built with.
#[async_trait]
pub trait PushManager: Send + Sync {
    /// Open the connection and begin emitting status events.
    async fn start(&self) -> Result<()>;

    /// Close the connection and stop all workers.
    async fn stop(&self) -> Result<()>;

    /// Resume consuming update notifications.
    fn start_workers(&self);

    /// Stop consuming update notifications while keeping the connection
    /// management alive.
    fn stop_workers(&self);

    /// When the current streaming credential must be refreshed.
    fn next_refresh(&self) -> DateTime<Utc>;
}

/// Everything a push manager needs from the orchestrator at construction.
#[derive(Debug, Clone)]
pub struct PushManagerContext {
    /// Bounded queue the push manager reports its status on.
    pub status_tx: mpsc::Sender<StatusEvent>,
    /// Optional 4-character client identifier.
    pub client_key: Option<String>,
}

/// Builds the push manager once the status queue exists.
pub type PushManagerFactory =
    Box<dyn FnOnce(PushManagerContext) -> Result<Arc<dyn PushManager>> + Send>;
