//! The non-blocking claim step.

use super::handle::Lock;
use super::metadata::LockMetadata;
use super::nonce;
use super::{HELD_FILE, METADATA_FILE};
use crate::error::{FsLockError, Result};
use std::fs;
use std::io::{self, ErrorKind};
use tempfile::TempDir;
use tracing::{debug, warn};

impl Lock {
    /// Try once to become the owner.
    ///
    /// Returns `Ok(false)` when the lock is held by anyone, including a race
    /// lost to a concurrent claimant. Contention is never an error.
    ///
    /// The claim directory is staged with its `held` marker and metadata
    /// already inside, then renamed into place. A successful rename therefore
    /// publishes a fully marked claim, and renaming onto an existing claim
    /// fails because that directory is not empty.
    ///
    /// # Errors
    ///
    /// * `FsLockError::Io` - the claim directory could not be inspected, or
    ///   staging/renaming failed for a reason other than contention
    pub fn try_claim(&self) -> Result<bool> {
        let claim_dir = self.claim_dir();

        match fs::symlink_metadata(&claim_dir) {
            Ok(_) => {
                debug!(lock = %self.name, "lock is held elsewhere");
                return Ok(false);
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(FsLockError::io("inspect claim directory", &claim_dir, e)),
        }

        let staging = self.stage_claim()?;

        match fs::rename(staging.path(), &claim_dir) {
            Ok(()) => {
                // Staging path is gone; don't let the guard touch it.
                let _ = staging.keep();
                debug!(lock = %self.name, "acquired lock");
                Ok(true)
            }
            Err(e) if lost_race(&e) => {
                debug!(lock = %self.name, "lost race for lock");
                discard_staging(staging);
                Ok(false)
            }
            Err(e) => {
                discard_staging(staging);
                Err(FsLockError::io("move staging directory to", &claim_dir, e))
            }
        }
    }

    /// Create a staging directory holding the `held` marker and metadata.
    ///
    /// The directory name is derived from the hex nonce plus a random suffix.
    /// It is removed automatically if anything here fails.
    fn stage_claim(&self) -> Result<TempDir> {
        let prefix = format!(".{}.", nonce::to_hex(&self.nonce));
        let mut builder = tempfile::Builder::new();
        builder.prefix(&prefix);

        let scratch = self.config.scratch_dir.clone().unwrap_or_else(std::env::temp_dir);
        let staging = builder
            .tempdir_in(&scratch)
            .map_err(|e| FsLockError::io("create staging directory in", &scratch, e))?;

        let held = staging.path().join(HELD_FILE);
        fs::write(&held, self.nonce).map_err(|e| FsLockError::io("write held marker", &held, e))?;

        let info = staging.path().join(METADATA_FILE);
        let json = LockMetadata::new()
            .to_json()
            .map_err(|e| FsLockError::io("serialize holder metadata for", &info, e.into()))?;
        fs::write(&info, json).map_err(|e| FsLockError::io("write holder metadata", &info, e))?;

        Ok(staging)
    }
}

/// Whether a failed rename means another claimant got there first.
///
/// Linux reports a non-empty destination directory as `ENOTEMPTY`, other
/// platforms as `EEXIST`.
pub(super) fn lost_race(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::AlreadyExists | ErrorKind::DirectoryNotEmpty
    )
}

fn discard_staging(staging: TempDir) {
    let path = staging.path().to_path_buf();
    if let Err(e) = staging.close() {
        warn!(path = %path.display(), error = %e, "failed to remove staging directory");
    }
}
