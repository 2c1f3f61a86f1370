use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, Sender};
use tracing::trace;

use super::{Lock, TimedLock};

/// Timeout used by [`ChannelLock::try_lock`] when none is configured.
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_millis(10);

/// Binary semaphore built from a bounded channel with a single slot.
///
/// Acquiring pushes a permit into the slot and blocks while the slot is full;
/// releasing pops it. Competing acquirers are not served in FIFO order.
pub struct ChannelLock {
    permits: Sender<()>,
    slot: Receiver<()>,
    default_timeout: Duration,
}

impl ChannelLock {
    pub fn new() -> Self {
        Self::with_default_timeout(DEFAULT_LOCK_TIMEOUT)
    }

    /// Create a lock whose `try_lock` waits up to `timeout`.
    /// A zero timeout falls back to [`DEFAULT_LOCK_TIMEOUT`].
    pub fn with_default_timeout(timeout: Duration) -> Self {
        let (permits, slot) = bounded(1);
        ChannelLock {
            permits,
            slot,
            default_timeout: if timeout.is_zero() {
                DEFAULT_LOCK_TIMEOUT
            } else {
                timeout
            },
        }
    }

    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    /// Whether the permit slot is currently occupied. Racy; for diagnostics and tests.
    pub fn is_locked(&self) -> bool {
        self.permits.is_full()
    }
}

impl Default for ChannelLock {
    fn default() -> Self {
        Self::new()
    }
}

impl Lock for ChannelLock {
    fn lock(&self) {
        // Both ends live in `self`, so the channel can never disconnect.
        if self.permits.send(()).is_err() {
            unreachable!("ChannelLock permit slot disconnected");
        }
    }

    fn try_lock(&self) -> bool {
        self.try_lock_for(self.default_timeout)
    }

    fn unlock(&self) {
        if self.slot.try_recv().is_err() {
            panic!("ChannelLock::unlock called on an unlocked lock");
        }
    }
}

impl TimedLock for ChannelLock {
    fn try_lock_for(&self, timeout: Duration) -> bool {
        let timeout = if timeout.is_zero() {
            self.default_timeout
        } else {
            timeout
        };
        match self.permits.send_timeout((), timeout) {
            Ok(()) => true,
            Err(_) => {
                trace!(?timeout, "channel lock try_lock timed out");
                false
            }
        }
    }
}
