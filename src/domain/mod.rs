//! Runtime-agnostic domain types: modes, status signals, telemetry records,
//! and watchdog windows.

pub mod health;
pub mod mode;
pub mod status;
pub mod telemetry;
