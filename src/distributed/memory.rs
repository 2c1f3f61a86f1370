use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use super::LockStore;
use crate::lock::StoreError;

struct Entry {
    token: String,
    /// `None` when the expiry lies beyond what `Instant` can represent.
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |at| now < at)
    }
}

/// In-memory [`LockStore`] backed by a `HashMap` under one mutex.
///
/// Expired entries are treated as absent, which gives the same observable TTL
/// behavior as a real store. Every successful acquire also sweeps out all
/// expired entries, so abandoned keys do not pile up. Useful for tests and
/// for coordinating lock holders that share one process.
pub struct MemoryLockStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryLockStore {
    pub fn new() -> Self {
        MemoryLockStore {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Current holder token for `key`, if the entry exists and has not expired.
    pub fn get(&self, key: &str) -> Option<String> {
        let now = Instant::now();
        self.entries
            .lock()
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.token.clone())
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .lock()
            .values()
            .filter(|entry| entry.is_live(now))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryLockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LockStore for MemoryLockStore {
    fn set_if_absent(&self, key: &str, token: &str, expire: Duration) -> Result<bool, StoreError> {
        let now = Instant::now();
        let mut entries = self.entries.lock();
        if entries.get(key).is_some_and(|entry| entry.is_live(now)) {
            return Ok(false);
        }
        entries.retain(|_, entry| entry.is_live(now));
        entries.insert(
            key.to_string(),
            Entry {
                token: token.to_string(),
                expires_at: now.checked_add(expire),
            },
        );
        Ok(true)
    }

    fn compare_and_delete(&self, key: &str, token: &str) -> Result<bool, StoreError> {
        let now = Instant::now();
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if !entry.is_live(now) => {
                entries.remove(key);
                Ok(false)
            }
            Some(entry) if entry.token == token => {
                entries.remove(key);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
