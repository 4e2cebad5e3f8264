//! Infrastructure configuration modules.

pub mod backoff;
pub mod health;
pub mod logging;
pub mod settings;
pub mod sync;
