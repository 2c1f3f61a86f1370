use std::sync::Arc;
use std::time::Duration;

use crate::lock::StoreError;

/// Shared key-value store a [`DistributedLock`](super::DistributedLock) coordinates through.
///
/// The store, not the caller, is the single arbiter: both operations must be
/// atomic on the store side, and expiry runs on the store's clock.
pub trait LockStore: Send + Sync {
    /// Set `key = token` with automatic expiry, only if `key` is absent.
    ///
    /// Returns `Ok(true)` when written, `Ok(false)` when the key already
    /// exists, and `Err` only for transport/backend failures.
    fn set_if_absent(&self, key: &str, token: &str, expire: Duration) -> Result<bool, StoreError>;

    /// Delete `key` only if its stored value equals `token`, as one
    /// indivisible operation. Returns `Ok(true)` iff an entry was removed.
    fn compare_and_delete(&self, key: &str, token: &str) -> Result<bool, StoreError>;
}

impl<S: LockStore + ?Sized> LockStore for Arc<S> {
    fn set_if_absent(&self, key: &str, token: &str, expire: Duration) -> Result<bool, StoreError> {
        (**self).set_if_absent(key, token, expire)
    }

    fn compare_and_delete(&self, key: &str, token: &str) -> Result<bool, StoreError> {
        (**self).compare_and_delete(key, token)
    }
}
