//! Reconnect backoff for the streaming path.
//!
//! Used only when the push manager reports a retryable error. The sequence is
//! deterministic: `initial * multiplier^attempt`, capped at `max_delay`.

use std::time::Duration;

use crate::error::ConfigError;

/// Settings for [`Backoff`].
#[derive(Debug, Clone, PartialEq)]
pub struct BackoffSettings {
    /// Wait returned by the first [`Backoff::next_delay`] call.
    pub initial_delay: Duration,
    /// Upper bound for any wait.
    pub max_delay: Duration,
    /// Growth factor applied after each call.
    pub multiplier: f64,
}

impl BackoffSettings {
    /// Reject settings that would produce a shrinking or undefined sequence.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.multiplier.is_finite() || self.multiplier < 1.0 {
            return Err(ConfigError::InvalidValue {
                field: "backoff.multiplier",
                reason: "must be a finite number >= 1.0".to_string(),
            });
        }
        if self.initial_delay > self.max_delay {
            return Err(ConfigError::InvalidValue {
                field: "backoff.initial_delay_ms",
                reason: "must not exceed max_delay_ms".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for BackoffSettings {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30 * 60),
            multiplier: 2.0,
        }
    }
}

/// Stateful wait-duration sequence.
///
/// The status watcher is the only caller, so no internal locking is needed.
#[derive(Debug, Clone)]
pub struct Backoff {
    settings: BackoffSettings,
    attempt: u32,
    current_delay: Duration,
}

impl Backoff {
    pub fn new(settings: BackoffSettings) -> Self {
        let current_delay = settings.initial_delay.min(settings.max_delay);
        Self {
            settings,
            attempt: 0,
            current_delay,
        }
    }

    /// Return the current wait and advance the sequence.
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.current_delay;
        self.attempt = self.attempt.saturating_add(1);

        let grown = Duration::try_from_secs_f64(
            self.current_delay.as_secs_f64() * self.settings.multiplier,
        )
        .unwrap_or(self.settings.max_delay);
        self.current_delay = grown.min(self.settings.max_delay);

        delay
    }

    /// Return the sequence to its initial state.
    pub fn reset(&mut self) {
        self.attempt = 0;
        self.current_delay = self.settings.initial_delay.min(self.settings.max_delay);
    }

    /// Number of waits handed out since the last reset.
    #[must_use]
    pub fn attempt(&self) -> u32 {
        self.attempt
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(BackoffSettings::default())
    }
}
