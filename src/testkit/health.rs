//! Recording [`HealthMonitor`] for tests.

use parking_lot::Mutex;

use crate::domain::health::MonitoredTask;
use crate::port::outbound::health::HealthMonitor;

/// Records every watchdog reset in call order.
#[derive(Default)]
pub struct RecordingHealthMonitor {
    resets: Mutex<Vec<(MonitoredTask, i64)>>,
}

impl RecordingHealthMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resets(&self) -> Vec<(MonitoredTask, i64)> {
        self.resets.lock().clone()
    }

    /// Most recent tolerance set for `task`.
    pub fn last(&self, task: MonitoredTask) -> Option<i64> {
        self.resets
            .lock()
            .iter()
            .rev()
            .find(|(t, _)| *t == task)
            .map(|(_, secs)| *secs)
    }
}

impl HealthMonitor for RecordingHealthMonitor {
    fn reset(&self, task: MonitoredTask, tolerance_secs: i64) {
        self.resets.lock().push((task, tolerance_secs));
    }
}
