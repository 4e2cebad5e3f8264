//! Operation mode of the synchronization orchestrator.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

/// Which update strategy is currently authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationMode {
    /// Fixed-interval fetches keep the dataset fresh.
    Polling,
    /// The push channel delivers near-real-time updates.
    Streaming,
}

impl OperationMode {
    /// Stable name used in logs and telemetry.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Polling => "polling",
            Self::Streaming => "streaming",
        }
    }

    const fn to_raw(self) -> u8 {
        match self {
            Self::Polling => 0,
            Self::Streaming => 1,
        }
    }

    const fn from_raw(raw: u8) -> Self {
        match raw {
            1 => Self::Streaming,
            _ => Self::Polling,
        }
    }
}

impl fmt::Display for OperationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Atomically readable holder for the current [`OperationMode`].
///
/// Only one logical owner writes at a time: the start path before the status
/// watcher exists, the watcher afterwards. Everyone else only loads.
#[derive(Debug)]
pub struct ModeCell {
    raw: AtomicU8,
}

impl ModeCell {
    #[must_use]
    pub const fn new(mode: OperationMode) -> Self {
        Self {
            raw: AtomicU8::new(mode.to_raw()),
        }
    }

    #[must_use]
    pub fn load(&self) -> OperationMode {
        OperationMode::from_raw(self.raw.load(Ordering::Acquire))
    }

    pub fn store(&self, mode: OperationMode) {
        self.raw.store(mode.to_raw(), Ordering::Release);
    }
}

impl Default for ModeCell {
    fn default() -> Self {
        Self::new(OperationMode::Polling)
    }
}
