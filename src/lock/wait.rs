//! Blocking and deadline-bounded acquisition.

use super::handle::Lock;
use crate::error::Result;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;
use tracing::debug;

impl Lock {
    /// Block until the lock is acquired.
    ///
    /// Retries [`Lock::try_claim`] every `wait_delay` with no upper bound.
    /// An I/O error aborts the wait immediately and is never retried.
    pub fn lock(&self) -> Result<()> {
        let delay = self.config.wait_delay();
        let mut attempts: u64 = 0;
        loop {
            attempts += 1;
            if self.try_claim()? {
                debug!(lock = %self.name, attempts, "lock acquired");
                return Ok(());
            }
            thread::sleep(delay);
        }
    }

    /// Try to acquire the lock, giving up after `max_wait`.
    ///
    /// The retry loop runs on a worker thread. When the deadline passes the
    /// caller signals cancellation and then waits for the worker's final
    /// outcome, so an attempt already in flight still counts: a success that
    /// races the deadline is reported as `Ok(true)`, and an I/O error is
    /// never masked by the timeout.
    ///
    /// `Duration::ZERO` makes exactly one claim attempt.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - the lock is now held by this instance
    /// * `Ok(false)` - the deadline passed while the lock was held elsewhere
    /// * `Err(FsLockError::Io)` - a claim attempt failed
    pub fn try_lock(&self, max_wait: Duration) -> Result<bool> {
        let (outcome_tx, outcome_rx) = mpsc::channel::<Result<bool>>();
        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();

        thread::scope(|scope| {
            scope.spawn(move || {
                // The receiver may be gone if the caller panicked; nothing to report to.
                let _ = outcome_tx.send(self.retry_until_cancelled(&cancel_rx));
            });

            match outcome_rx.recv_timeout(max_wait) {
                Ok(outcome) => outcome,
                Err(RecvTimeoutError::Timeout) => {
                    debug!(lock = %self.name, ?max_wait, "deadline reached, cancelling wait");
                    // Fails only if the worker already finished; its outcome is queued.
                    let _ = cancel_tx.send(());
                    // Disconnected means the worker panicked; the scope re-raises it.
                    outcome_rx.recv().unwrap_or(Ok(false))
                }
                Err(RecvTimeoutError::Disconnected) => Ok(false),
            }
        })
    }

    /// Claim attempts separated by `wait_delay` until acquired, failed, or cancelled.
    ///
    /// Cancellation is only observed between attempts, so the outcome of the
    /// last attempt is always the one reported.
    fn retry_until_cancelled(&self, cancel: &Receiver<()>) -> Result<bool> {
        let delay = self.config.wait_delay();
        loop {
            if self.try_claim()? {
                return Ok(true);
            }
            match cancel.recv_timeout(delay) {
                Err(RecvTimeoutError::Timeout) => continue,
                Ok(()) | Err(RecvTimeoutError::Disconnected) => return Ok(false),
            }
        }
    }
}
