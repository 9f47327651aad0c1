//! Ownership queries and release.

use super::handle::Lock;
use super::metadata::LockMetadata;
use super::nonce;
use crate::error::{FsLockError, Result};
use std::fs;
use std::io::ErrorKind;
use tracing::debug;

impl Lock {
    /// Whether this instance currently owns the lock.
    ///
    /// True only if the `held` marker exists and contains exactly this
    /// instance's nonce. Any read failure counts as "not mine".
    pub fn is_held(&self) -> bool {
        fs::read(self.held_file())
            .map(|held| held == self.nonce)
            .unwrap_or(false)
    }

    /// Whether anyone holds the lock, i.e. the claim directory exists.
    pub fn is_locked(&self) -> Result<bool> {
        let claim_dir = self.claim_dir();
        match fs::symlink_metadata(&claim_dir) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(FsLockError::io("inspect claim directory", &claim_dir, e)),
        }
    }

    /// Metadata written by the current holder, if the lock is held and the
    /// metadata is readable.
    pub fn holder(&self) -> Option<LockMetadata> {
        LockMetadata::from_file(self.metadata_file()).ok()
    }

    /// Release the lock.
    ///
    /// # Errors
    ///
    /// * `FsLockError::NotHeld` - this instance is not the owner; nothing is touched
    /// * `FsLockError::Io` - the claim directory could not be moved aside, in
    ///   which case this instance is still the owner, or the moved-aside
    ///   directory could not be deleted, in which case the lock is released
    pub fn unlock(&self) -> Result<()> {
        if !self.is_held() {
            return Err(FsLockError::NotHeld {
                name: self.name.clone(),
            });
        }

        // Move the claim aside first so the release is a single atomic step
        // and a new claimant can never land in a half-deleted directory.
        let claim_dir = self.claim_dir();
        let released = self
            .parent
            .join(format!(".{}.released", nonce::to_hex(&self.nonce)));
        fs::rename(&claim_dir, &released)
            .map_err(|e| FsLockError::io("release claim directory", &claim_dir, e))?;
        debug!(lock = %self.name, "released lock");

        fs::remove_dir_all(&released)
            .map_err(|e| FsLockError::io("remove released claim directory", &released, e))
    }
}
