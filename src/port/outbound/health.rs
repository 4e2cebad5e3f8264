//! Health monitor port.

use crate::domain::health::MonitoredTask;

/// External watchdog tracking the periodic fetch tasks.
pub trait HealthMonitor: Send + Sync {
    /// Replace the failure window of `task` with `tolerance_secs` from now.
    fn reset(&self, task: MonitoredTask, tolerance_secs: i64);
}
