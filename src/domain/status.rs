//! Status signals exchanged between the push channel, the orchestrator, and
//! the host application.

use std::fmt;

/// Coarse status emitted by the push manager.
///
/// Delivered through a bounded queue and consumed strictly in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusEvent {
    /// The push connection is established and delivering updates.
    Up,
    /// The push connection is healthy but temporarily not delivering updates.
    Down,
    /// A transient failure; streaming should be retried after a backoff.
    RetryableError,
    /// A permanent failure; streaming stays off until the next full start.
    NonRetryableError,
}

impl StatusEvent {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::RetryableError => "retryable_error",
            Self::NonRetryableError => "non_retryable_error",
        }
    }
}

impl fmt::Display for StatusEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome reported to the host once per start attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManagerStatus {
    /// The initial full synchronization succeeded.
    Ready,
    /// The push channel became ready. Reserved for hosts that wait on
    /// streaming; the orchestrator itself reports [`ManagerStatus::Ready`].
    StreamingReady,
    /// The initial full synchronization failed; the orchestrator is idle again.
    Error,
}

impl ManagerStatus {
    #[must_use]
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready | Self::StreamingReady)
    }
}
