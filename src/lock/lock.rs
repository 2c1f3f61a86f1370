use std::time::Duration;

/// Trait for a single in-process lock instance.
///
/// Implementations provide blocking lock, try-lock, and unlock. Callers share
/// one instance (usually behind an `Arc`) to be mutually exclusive.
///
/// Every `unlock` must pair with a preceding successful `lock`/`try_lock`.
/// Releasing a lock that is not held is a programming error and panics.
pub trait Lock: Send + Sync {
    /// Acquire the lock, blocking until it becomes available.
    fn lock(&self);

    /// Try to acquire the lock.
    /// Returns `true` if acquired, `false` if it stayed held by someone else.
    fn try_lock(&self) -> bool;

    /// Release the lock.
    ///
    /// # Panics
    /// If the lock is not currently held.
    fn unlock(&self);

    /// Acquire the lock and return a guard that releases it on drop.
    fn guard(&self) -> LockGuard<'_, Self>
    where
        Self: Sized,
    {
        self.lock();
        LockGuard { lock: self }
    }
}

/// A lock whose acquisition can be bounded by a deadline.
pub trait TimedLock: Lock {
    /// Try to acquire the lock, giving up once `timeout` has elapsed.
    fn try_lock_for(&self, timeout: Duration) -> bool;
}

/// RAII guard returned by [`Lock::guard`]. Unlocks when dropped.
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct LockGuard<'a, L: Lock> {
    lock: &'a L,
}

impl<L: Lock> Drop for LockGuard<'_, L> {
    fn drop(&mut self) {
        self.lock.unlock();
    }
}
