//! Application services (use cases).
//!
//! Coordinates the domain types and the outbound ports to keep the local
//! dataset synchronized.

pub mod synchronization;
