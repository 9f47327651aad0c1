//! fslock: cross-process mutual exclusion using only the filesystem.
//!
//! A lock is a directory. Whoever renames a staged directory into
//! `<parent>/<name>` first holds the lock; everybody else sees the rename
//! fail. Ownership is proven by a random nonce stored in the claimed
//! directory, so a stale handle can never release someone else's claim.
//!
//! ```no_run
//! use fslock::Lock;
//! use std::time::Duration;
//!
//! # fn main() -> fslock::Result<()> {
//! let lock = Lock::new("/tmp/locks", "build-lock")?;
//! if lock.try_lock(Duration::from_secs(2))? {
//!     // ... exclusive work ...
//!     lock.unlock()?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! There is no expiry: a claim left by a crashed process stays until removed
//! by hand.

pub mod config;
pub mod error;
pub mod exit_codes;
pub mod lock;

pub use config::LockConfig;
pub use error::{FsLockError, Result};
pub use lock::{Lock, LockGuard, LockMetadata};
