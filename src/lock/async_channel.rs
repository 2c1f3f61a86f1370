use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::trace;

use super::channel::DEFAULT_LOCK_TIMEOUT;

/// Async flavour of [`ChannelLock`](super::ChannelLock) for tokio tasks.
///
/// Same single-slot permit semantics; waiting acquirers yield to the runtime
/// instead of parking the thread. `unlock` is synchronous and never waits.
pub struct AsyncChannelLock {
    permits: mpsc::Sender<()>,
    slot: Mutex<mpsc::Receiver<()>>,
    default_timeout: Duration,
}

impl AsyncChannelLock {
    pub fn new() -> Self {
        Self::with_default_timeout(DEFAULT_LOCK_TIMEOUT)
    }

    pub fn with_default_timeout(timeout: Duration) -> Self {
        let (permits, slot) = mpsc::channel(1);
        AsyncChannelLock {
            permits,
            slot: Mutex::new(slot),
            default_timeout: if timeout.is_zero() {
                DEFAULT_LOCK_TIMEOUT
            } else {
                timeout
            },
        }
    }

    pub async fn lock(&self) {
        if self.permits.send(()).await.is_err() {
            unreachable!("AsyncChannelLock permit slot disconnected");
        }
    }

    pub async fn try_lock(&self) -> bool {
        self.try_lock_for(self.default_timeout).await
    }

    /// Race permit insertion against `timeout`. Zero means the default timeout.
    pub async fn try_lock_for(&self, timeout: Duration) -> bool {
        let timeout = if timeout.is_zero() {
            self.default_timeout
        } else {
            timeout
        };
        match tokio::time::timeout(timeout, self.permits.send(())).await {
            Ok(Ok(())) => true,
            Ok(Err(_)) => false,
            Err(_) => {
                trace!(?timeout, "async channel lock try_lock timed out");
                false
            }
        }
    }

    /// # Panics
    /// If the lock is not currently held.
    pub fn unlock(&self) {
        if self.slot.lock().try_recv().is_err() {
            panic!("AsyncChannelLock::unlock called on an unlocked lock");
        }
    }

    pub fn is_locked(&self) -> bool {
        self.permits.capacity() == 0
    }
}

impl Default for AsyncChannelLock {
    fn default() -> Self {
        Self::new()
    }
}
