//! Configuration model for fslock.
//!
//! `LockConfig` controls the retry cadence of the waiting operations and
//! where staging directories are created. It can be built in code or loaded
//! from a YAML file; unknown fields are ignored and missing fields use
//! defaults.

mod model;
mod operations;


// Re-export public API
pub use model::{DEFAULT_WAIT_DELAY_MS, LockConfig};
