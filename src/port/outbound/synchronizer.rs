//! Synchronizer port.
//!
//! The synchronizer owns the fetch/apply logic and the periodic background
//! tasks. The orchestrator only decides when those run.

use async_trait::async_trait;

use crate::domain::health::RefreshRates;
use crate::error::Result;

/// Performs synchronization passes and runs periodic fetch/recording tasks.
///
/// The `start_*`/`stop_*` methods must return promptly; they schedule or
/// cancel background work owned by the implementation.
#[async_trait]
pub trait Synchronizer: Send + Sync {
    /// Run a full synchronization pass.
    ///
    /// `with_retries` lets the implementation apply its own retry policy.
    async fn sync_all(&self, with_retries: bool) -> Result<()>;

    /// Start the periodic fetch tasks (polling).
    fn start_periodic_fetching(&self);

    /// Stop the periodic fetch tasks.
    fn stop_periodic_fetching(&self);

    /// Start periodic recording/flushing of collected data.
    fn start_periodic_data_recording(&self);

    /// Stop periodic recording.
    fn stop_periodic_data_recording(&self);

    /// Current refresh intervals of the periodic fetch tasks.
    fn refresh_rates(&self) -> RefreshRates;
}
