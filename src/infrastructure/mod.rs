//! Infrastructure layer.
//!
//! Configuration loading and the composition root. No orchestration logic
//! lives here.
//!
//! # Submodules
//!
//! - [`bootstrap`] - Composition root for runtime wiring
//! - [`config`] - Configuration loading and validation

pub mod bootstrap;
pub mod config;
