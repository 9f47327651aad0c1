//! Error types for fslock.
//!
//! Uses thiserror for derive macros. Contention is never an error: the claim
//! and wait operations report it as `Ok(false)`.

use crate::exit_codes;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for lock operations.
#[derive(Error, Debug)]
pub enum FsLockError {
    /// The lock name does not match the naming pattern.
    #[error("invalid lock name {name:?}: names must match {pattern:?}")]
    InvalidName { name: String, pattern: &'static str },

    /// A filesystem operation failed.
    #[error("failed to {action} '{}': {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Release was attempted by an instance that does not own the lock.
    #[error("lock '{name}' is not held by this instance")]
    NotHeld { name: String },

    /// The OS random source could not produce a nonce.
    #[error("failed to generate lock nonce: {0}")]
    RandomSource(#[from] rand::Error),

    /// Configuration could not be loaded or is invalid.
    #[error("{0}")]
    Config(String),
}

impl FsLockError {
    /// Build an `Io` error for `action` on `path`.
    pub fn io(action: &'static str, path: &Path, source: std::io::Error) -> Self {
        FsLockError::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }

    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            FsLockError::InvalidName { .. } => exit_codes::USER_ERROR,
            FsLockError::Config(_) => exit_codes::USER_ERROR,
            FsLockError::NotHeld { .. } => exit_codes::USER_ERROR,
            FsLockError::Io { .. } => exit_codes::IO_FAILURE,
            FsLockError::RandomSource(_) => exit_codes::IO_FAILURE,
        }
    }
}

/// Result type alias for lock operations.
pub type Result<T> = std::result::Result<T, FsLockError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_name_mentions_name_and_pattern() {
        let err = FsLockError::InvalidName {
            name: "Bad".to_string(),
            pattern: "^[a-z]+$",
        };
        let msg = err.to_string();
        assert!(msg.contains("\"Bad\""));
        assert!(msg.contains("^[a-z]+$"));
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn io_error_includes_action_and_path() {
        let err = FsLockError::io(
            "remove claim directory",
            Path::new("/tmp/locks/build"),
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        );
        let msg = err.to_string();
        assert!(msg.starts_with("failed to remove claim directory '/tmp/locks/build'"));
        assert_eq!(err.exit_code(), exit_codes::IO_FAILURE);
    }

    #[test]
    fn not_held_error_is_descriptive() {
        let err = FsLockError::NotHeld {
            name: "build-lock".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "lock 'build-lock' is not held by this instance"
        );
    }
}
