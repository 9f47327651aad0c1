//! The `Lock` handle: identity, nonce, and construction.

use super::name::validate_name;
use super::nonce::{self, Nonce};
use super::{HELD_FILE, METADATA_FILE};
use crate::config::LockConfig;
use crate::error::{FsLockError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A named lock inside a parent directory.
///
/// Constructing a `Lock` does not acquire it. Use [`Lock::lock`],
/// [`Lock::try_lock`] or [`Lock::try_claim`] to take it and
/// [`Lock::unlock`] to give it back.
///
/// Each instance is meant to be driven by a single owner at a time. Two
/// instances with the same name and parent contend exactly like two
/// processes would.
#[derive(Debug)]
pub struct Lock {
    pub(super) name: String,
    pub(super) parent: PathBuf,
    pub(super) nonce: Nonce,
    pub(super) config: LockConfig,
}

impl Lock {
    /// Create a lock named `name` under `parent` with default settings.
    ///
    /// The parent directory is created if missing.
    ///
    /// # Errors
    ///
    /// * `FsLockError::InvalidName` - `name` does not match [`LOCK_NAME_PATTERN`](super::LOCK_NAME_PATTERN)
    /// * `FsLockError::RandomSource` - the nonce could not be generated
    /// * `FsLockError::Io` - the parent directory could not be created
    pub fn new(parent: impl AsRef<Path>, name: &str) -> Result<Self> {
        Self::with_config(parent, name, LockConfig::default())
    }

    /// Create a lock with an explicit configuration.
    pub fn with_config(parent: impl AsRef<Path>, name: &str, config: LockConfig) -> Result<Self> {
        validate_name(name)?;
        config.validate()?;
        let nonce = nonce::generate()?;

        let parent = parent.as_ref().to_path_buf();
        create_parent_dir(&parent)?;

        debug!(lock = name, parent = %parent.display(), "created lock handle");

        Ok(Self {
            name: name.to_string(),
            parent,
            nonce,
            config,
        })
    }

    /// The lock name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The directory containing the claim directory.
    pub fn parent_dir(&self) -> &Path {
        &self.parent
    }

    /// Path of the claim directory, `<parent>/<name>`.
    pub fn claim_dir(&self) -> PathBuf {
        self.parent.join(&self.name)
    }

    /// Path of the held marker, `<parent>/<name>/held`.
    pub fn held_file(&self) -> PathBuf {
        self.claim_dir().join(HELD_FILE)
    }

    pub(super) fn metadata_file(&self) -> PathBuf {
        self.claim_dir().join(METADATA_FILE)
    }

    /// This instance's ownership nonce.
    pub fn nonce(&self) -> &[u8] {
        &self.nonce
    }

    /// Settings this lock was built with.
    pub fn config(&self) -> &LockConfig {
        &self.config
    }
}

/// `mkdir -p` with mode 0755 on unix.
fn create_parent_dir(dir: &Path) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder
        .create(dir)
        .map_err(|e| FsLockError::io("create parent directory", dir, e))
}
