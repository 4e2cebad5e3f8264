//! Streaming/polling synchronization orchestration.
//!
//! [`manager::SyncManager`] is the entry point; the remaining modules are
//! its building blocks.

pub mod backoff;
pub mod builder;
pub mod health;
pub mod lifecycle;
pub mod manager;
pub mod mode;
pub mod status;
mod supervisor;
mod watcher;
