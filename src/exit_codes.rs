//! Exit code constants for the fslock CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid name or config)
//! - 3: Filesystem failure
//! - 4: Lock not acquired (held elsewhere or timed out)
//!
//! `fslock run` passes the child's own exit code through unchanged.

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid lock name or configuration.
pub const USER_ERROR: i32 = 1;

/// Filesystem or random source failure.
pub const IO_FAILURE: i32 = 3;

/// The lock is held by someone else, or could not be acquired in time.
pub const NOT_ACQUIRED: i32 = 4;
