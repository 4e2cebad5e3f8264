//! Sync orchestrator - keeps a local feature-flag dataset in sync by
//! switching between a push channel and periodic polling.
//!
//! The orchestrator decides at any instant which strategy is authoritative,
//! moves between them on push status events, and never double-starts workers
//! or deadlocks on shutdown.
//!
//! # Architecture
//!
//! - **`domain`** - Modes, status events, telemetry records, watchdog windows
//! - **`port`** - Traits for the external collaborators (synchronizer, push
//!   manager, health monitor, telemetry)
//! - **`application`** - Lifecycle, mode controller, status watcher and the
//!   [`SyncManager`](application::synchronization::manager::SyncManager) facade
//! - **`adapter`** - Log-only port implementations
//! - **`infrastructure`** - TOML configuration and the composition root
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use sync_orchestrator::application::synchronization::status::StatusQueue;
//! use sync_orchestrator::infrastructure::bootstrap::{build_sync_manager, Collaborators};
//! use sync_orchestrator::infrastructure::config::settings::Config;
//! # use sync_orchestrator::port::outbound::synchronizer::Synchronizer;
//!
//! # async fn run(synchronizer: Arc<dyn Synchronizer>) -> sync_orchestrator::error::Result<()> {
//! let config = Config::parse_toml("[sync]\nstreaming_enabled = false")?;
//! config.init_logging();
//!
//! let status = StatusQueue::new(1)?;
//! let manager = build_sync_manager(&config, Collaborators::new(synchronizer), status.clone())?;
//! manager.start().await;
//! let ready = status.recv().await;
//! manager.stop().await;
//! # let _ = ready;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
