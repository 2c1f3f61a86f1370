use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use lockkit::{LockStore, StoreError};

#[derive(Debug)]
pub struct Unavailable;

impl fmt::Display for Unavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "store unavailable")
    }
}

impl std::error::Error for Unavailable {}

/// Store whose every call fails, counting how often it was hit.
#[derive(Default)]
pub struct DownStore {
    pub calls: AtomicUsize,
}

impl LockStore for DownStore {
    fn set_if_absent(&self, _key: &str, _token: &str, _expire: Duration) -> Result<bool, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(Box::new(Unavailable))
    }

    fn compare_and_delete(&self, _key: &str, _token: &str) -> Result<bool, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(Box::new(Unavailable))
    }
}
