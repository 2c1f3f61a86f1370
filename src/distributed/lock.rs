use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::LockStore;
use crate::config::{LockConfig, DEFAULT_EXPIRE_SECS, DEFAULT_KEY_PREFIX};
use crate::lock::{LockError, LockResult};

/// Largest accepted expiry; Redis `EX` takes a signed 64-bit integer.
pub const MAX_EXPIRE_SECS: u64 = i64::MAX as u64;

/// A fresh holder token, unique to one acquisition attempt.
pub fn generate_token() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Cross-process lock coordinated through conditional writes on a shared store.
///
/// Binds one key, one holder token and one expiry at construction. Each
/// `try_lock`/`unlock` is exactly one store round trip; there is no local
/// blocking, retrying or lease renewal. Callers that need to wait for the
/// lock loop around `try_lock` themselves.
///
/// Expiry runs on the store's clock. A holder that stalls past `expire` may
/// still believe it owns the lock after the store has handed it to someone
/// else, so size `expire` for the longest critical section.
pub struct DistributedLock<S: LockStore + ?Sized> {
    store: Arc<S>,
    key: String,
    token: String,
    expire: Duration,
}

impl<S: LockStore + ?Sized> DistributedLock<S> {
    /// Build a lock for `name` held under `token`.
    ///
    /// `expire_secs == 0` selects the default of 10 seconds. Fails with
    /// [`LockError::Config`] when `name` is empty or `expire_secs` exceeds
    /// [`MAX_EXPIRE_SECS`].
    pub fn new(
        store: Arc<S>,
        name: impl Into<String>,
        token: impl Into<String>,
        expire_secs: u64,
    ) -> LockResult<Self> {
        DistributedLockBuilder::new()
            .store(store)
            .name(name)
            .token(token)
            .expire_secs(expire_secs)
            .build()
    }

    pub fn builder() -> DistributedLockBuilder<S> {
        DistributedLockBuilder::new()
    }

    /// Try to take the lock with a single conditional write.
    ///
    /// ## Returns
    /// - `Ok(())`: the key was absent and now holds this lock's token
    /// - `Err(LockError::AlreadyLocked)`: another holder owns the key
    /// - `Err(LockError::Store)`: the store call failed; the error is passed through untouched
    pub fn try_lock(&self) -> LockResult<()> {
        match self.store.set_if_absent(&self.key, &self.token, self.expire) {
            Ok(true) => {
                debug!(key = %self.key, expire_secs = self.expire.as_secs(), "distributed lock acquired");
                Ok(())
            }
            Ok(false) => {
                debug!(key = %self.key, "distributed lock already held");
                Err(LockError::AlreadyLocked(self.key.clone()))
            }
            Err(err) => {
                warn!(key = %self.key, error = %err, "distributed lock acquire failed");
                Err(LockError::Store(err))
            }
        }
    }

    /// Release the lock if the store still holds this lock's token.
    ///
    /// The compare and the delete run as one atomic store operation, so a
    /// holder whose entry already expired cannot evict the next holder.
    ///
    /// ## Returns
    /// - `Ok(true)`: the entry was removed
    /// - `Ok(false)`: no-op; the entry expired or belongs to another token
    /// - `Err(LockError::Store)`: the store call failed
    pub fn unlock(&self) -> LockResult<bool> {
        match self.store.compare_and_delete(&self.key, &self.token) {
            Ok(true) => {
                debug!(key = %self.key, "distributed lock released");
                Ok(true)
            }
            Ok(false) => {
                warn!(key = %self.key, "distributed lock not released: entry expired or held by another token");
                Ok(false)
            }
            Err(err) => {
                warn!(key = %self.key, error = %err, "distributed lock release failed");
                Err(LockError::Store(err))
            }
        }
    }

    /// Store key, `"<prefix>:<name>"`.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn expire(&self) -> Duration {
        self.expire
    }
}

impl<S: LockStore + ?Sized> fmt::Debug for DistributedLock<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DistributedLock")
            .field("key", &self.key)
            .field("token", &self.token)
            .field("expire", &self.expire)
            .finish()
    }
}

/// Builder for [`DistributedLock`]. A missing store or empty name fails `build`.
pub struct DistributedLockBuilder<S: LockStore + ?Sized> {
    store: Option<Arc<S>>,
    name: String,
    token: Option<String>,
    expire_secs: u64,
    key_prefix: String,
    default_expire_secs: u64,
}

impl<S: LockStore + ?Sized> DistributedLockBuilder<S> {
    pub fn new() -> Self {
        DistributedLockBuilder {
            store: None,
            name: String::new(),
            token: None,
            expire_secs: 0,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            default_expire_secs: DEFAULT_EXPIRE_SECS,
        }
    }

    pub fn store(mut self, store: Arc<S>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Holder token. When unset, `build` generates one with [`generate_token`].
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Expiry in seconds; 0 selects the default.
    pub fn expire_secs(mut self, expire_secs: u64) -> Self {
        self.expire_secs = expire_secs;
        self
    }

    pub fn key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    /// Take the key prefix and default expiry from `config`.
    pub fn config(mut self, config: &LockConfig) -> Self {
        self.key_prefix = config.key_prefix.clone();
        self.default_expire_secs = config.default_expire_secs;
        self
    }

    pub fn build(self) -> LockResult<DistributedLock<S>> {
        let store = self
            .store
            .ok_or_else(|| LockError::Config("store client is not set".into()))?;
        if self.name.is_empty() {
            return Err(LockError::Config("lock name is empty".into()));
        }
        if self.key_prefix.is_empty() {
            return Err(LockError::Config("key prefix is empty".into()));
        }

        let expire_secs = match (self.expire_secs, self.default_expire_secs) {
            (0, 0) => DEFAULT_EXPIRE_SECS,
            (0, default) => default,
            (secs, _) => secs,
        };
        if expire_secs > MAX_EXPIRE_SECS {
            return Err(LockError::Config(format!(
                "expire of {expire_secs}s exceeds the maximum of {MAX_EXPIRE_SECS}s"
            )));
        }

        Ok(DistributedLock {
            store,
            key: format!("{}:{}", self.key_prefix, self.name),
            token: self.token.unwrap_or_else(generate_token),
            expire: Duration::from_secs(expire_secs),
        })
    }
}

impl<S: LockStore + ?Sized> Default for DistributedLockBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}
