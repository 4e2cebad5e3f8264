//! Outbound adapters (driven side).

pub mod log;
