//! RAII lock guard implementation.

use super::handle::Lock;
use crate::error::Result;
use std::time::Duration;
use tracing::warn;

/// RAII guard for an acquired [`Lock`].
///
/// When dropped, the lock is released if this instance still owns it.
/// If release fails, a warning is logged but no panic occurs.
#[derive(Debug)]
pub struct LockGuard<'a> {
    lock: &'a Lock,

    /// Whether the lock has been released manually.
    released: bool,
}

impl<'a> LockGuard<'a> {
    fn new(lock: &'a Lock) -> Self {
        Self {
            lock,
            released: false,
        }
    }

    /// The guarded lock.
    pub fn lock(&self) -> &'a Lock {
        self.lock
    }

    /// Manually release the lock.
    ///
    /// This is useful when you want to release the lock before the guard
    /// goes out of scope, and want to handle errors explicitly.
    ///
    /// The guard is consumed even when release fails, and nothing retries
    /// on drop. If the error says the claim directory could not be moved
    /// aside, the lock is still held; recover through [`Lock::unlock`].
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        self.lock.unlock()
    }
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        if self.released || !self.lock.is_held() {
            return;
        }
        if let Err(e) = self.lock.unlock() {
            warn!(lock = %self.lock.name(), error = %e, "failed to release lock on drop");
        }
    }
}

impl Lock {
    /// Block until acquired and return a guard that releases on drop.
    pub fn hold(&self) -> Result<LockGuard<'_>> {
        self.lock()?;
        Ok(LockGuard::new(self))
    }

    /// Like [`Lock::try_lock`], returning a guard when acquired.
    pub fn try_hold(&self, max_wait: Duration) -> Result<Option<LockGuard<'_>>> {
        Ok(self.try_lock(max_wait)?.then(|| LockGuard::new(self)))
    }
}
