//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! The orchestrator drives four collaborators it does not own: the
//! synchronizer, the push manager, the health monitor, and the telemetry sink.

pub mod outbound;
