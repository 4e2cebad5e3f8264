//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`synchronizer`] - `RecordingSynchronizer` with scripted sync results.
//! - [`push`] - `ScriptedPushManager` and a `PushHandle` that injects status
//!   events.
//! - [`health`], [`telemetry`] - Recording sinks.
//! - [`config`] - Canonical test options (fast backoff, streaming, polling).
//! - [`wait`] - Polling assertions for background tasks.

pub mod config;
pub mod health;
pub mod push;
pub mod synchronizer;
pub mod telemetry;
pub mod wait;
