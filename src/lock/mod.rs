//! On-disk mutex built on atomic directory renames.
//!
//! A lock named `build` under parent directory `locks/` is held by whoever
//! managed to create `locks/build/`. The claim directory is first staged
//! elsewhere and then renamed into place, because a rename onto an existing
//! directory fails for all contenders but one.
//!
//! # Layout
//!
//! ```text
//! <parent>/<name>/            claim directory; exists = held by someone
//! <parent>/<name>/held        raw nonce of the owning Lock instance
//! <parent>/<name>/info.json   holder metadata (diagnostics only)
//! ```
//!
//! # Ownership
//!
//! Every [`Lock`] carries a random 20-byte nonce. An instance owns the lock
//! only while the `held` file contains exactly its nonce; ownership is read
//! back from disk on every query rather than tracked in memory.
//!
//! # No expiry
//!
//! A lock left behind by a crashed process stays held until someone removes
//! the claim directory by hand.

mod claim;
mod guard;
mod handle;
mod metadata;
mod name;
mod nonce;
mod ownership;
mod wait;


// Re-export public API
pub use guard::LockGuard;
pub use handle::Lock;
pub use metadata::LockMetadata;
pub use name::{LOCK_NAME_PATTERN, validate_name};
pub use nonce::NONCE_LEN;

/// File inside the claim directory holding the owner's nonce.
pub const HELD_FILE: &str = "held";

/// File inside the claim directory holding [`LockMetadata`] as JSON.
pub const METADATA_FILE: &str = "info.json";
