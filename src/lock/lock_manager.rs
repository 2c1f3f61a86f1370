use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use super::Lock;

/// Factory trait for obtaining named local locks.
///
/// Repeated calls with the same name must return the same lock instance,
/// so every caller naming `"orders"` contends on one critical section.
pub trait LockManager: Send + Sync {
    /// The concrete lock type returned by this manager.
    type Lock: Lock;

    /// Get (or create) the lock for `name`.
    fn get_lock(&self, name: &str) -> Arc<Self::Lock>;
}

/// Explicitly constructed registry of named local locks.
///
/// Create one where it is needed and pass it down; there is no process-wide
/// instance. Locks are created lazily on first lookup.
pub struct LockRegistry<L> {
    locks: Mutex<HashMap<String, Arc<L>>>,
}

impl<L> LockRegistry<L> {
    pub fn new() -> Self {
        LockRegistry {
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Drop the registry's handle for `name`. Callers still holding the
    /// `Arc` keep a working lock, but later lookups get a fresh one.
    pub fn remove(&self, name: &str) -> Option<Arc<L>> {
        self.locks.lock().remove(name)
    }

    pub fn len(&self) -> usize {
        self.locks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.lock().is_empty()
    }
}

impl<L> Default for LockRegistry<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Lock + Default> LockManager for LockRegistry<L> {
    type Lock = L;

    fn get_lock(&self, name: &str) -> Arc<L> {
        self.locks
            .lock()
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(L::default()))
            .clone()
    }
}
