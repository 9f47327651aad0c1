//! LockConfig struct definition and default implementation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default delay between claim attempts, in milliseconds.
pub const DEFAULT_WAIT_DELAY_MS: u64 = 1000;

/// Configuration for a [`Lock`](crate::Lock).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockConfig {
    /// Milliseconds to wait between claim attempts in `lock`/`try_lock`.
    pub wait_delay_ms: u64,

    /// Directory in which staging directories are created before being
    /// renamed into place. Defaults to the OS temp directory.
    ///
    /// Must live on the same filesystem as the lock's parent directory,
    /// otherwise the rename fails.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scratch_dir: Option<PathBuf>,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            wait_delay_ms: DEFAULT_WAIT_DELAY_MS,
            scratch_dir: None,
        }
    }
}
