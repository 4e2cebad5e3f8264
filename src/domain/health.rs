//! Watchdog types for the periodic fetch tasks.

use std::time::Duration;

/// A periodic fetch task watched by the external health monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonitoredTask {
    /// Fetches feature-flag definitions.
    FlagDefinitions,
    /// Fetches segment definitions.
    Segments,
}

impl MonitoredTask {
    pub const ALL: [Self; 2] = [Self::FlagDefinitions, Self::Segments];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FlagDefinitions => "flag_definitions",
            Self::Segments => "segments",
        }
    }
}

/// Refresh intervals of the periodic fetch tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshRates {
    pub flag_definitions: Duration,
    pub segments: Duration,
}

impl RefreshRates {
    #[must_use]
    pub const fn for_task(&self, task: MonitoredTask) -> Duration {
        match task {
            MonitoredTask::FlagDefinitions => self.flag_definitions,
            MonitoredTask::Segments => self.segments,
        }
    }
}

/// Time budget after which the health monitor considers a task overdue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ToleranceWindow(Duration);

impl ToleranceWindow {
    /// Window while polling: base tolerance plus the task's refresh interval.
    #[must_use]
    pub fn polling(base: Duration, refresh_interval: Duration) -> Self {
        Self(base.saturating_add(refresh_interval))
    }

    /// Window while streaming: remaining credential lifetime plus tolerance.
    #[must_use]
    pub fn streaming(remaining_credential: Duration, tolerance: Duration) -> Self {
        Self(remaining_credential.saturating_add(tolerance))
    }

    #[must_use]
    pub const fn duration(self) -> Duration {
        self.0
    }

    /// Whole seconds, as expected by the health monitor.
    #[must_use]
    pub fn as_secs(self) -> i64 {
        i64::try_from(self.0.as_secs()).unwrap_or(i64::MAX)
    }
}
