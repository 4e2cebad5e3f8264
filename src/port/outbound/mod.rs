//! Outbound ports (driven side): interfaces implemented by the host's
//! fetch layer, streaming client, watchdog, and telemetry backends.

pub mod health;
pub mod push;
pub mod synchronizer;
pub mod telemetry;
