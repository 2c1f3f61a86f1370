use thiserror::Error;

/// Error returned by a [`LockStore`](crate::distributed::LockStore) backend.
///
/// Boxed as-is so callers can downcast to the concrete client error
/// (e.g. `redis::RedisError`) and tell store unavailability apart from
/// contention.
pub type StoreError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for lock operations.
pub type LockResult<T> = Result<T, LockError>;

/// Error type for lock operations.
///
/// Only the distributed lock reports errors. Misusing a local lock
/// (releasing it without holding it) is a programming error and panics.
#[derive(Error, Debug)]
pub enum LockError {
    /// Invalid construction arguments (missing store, empty name).
    #[error("lock configuration error: {0}")]
    Config(String),

    /// The key is currently held by another token. A normal contention
    /// outcome, not a fault.
    #[error("lock already held: {0}")]
    AlreadyLocked(String),

    /// The store client failed (network, backend, script error).
    #[error(transparent)]
    Store(StoreError),
}

impl LockError {
    /// True when the lock is simply held by someone else; retrying later may succeed.
    pub fn is_contention(&self) -> bool {
        matches!(self, LockError::AlreadyLocked(_))
    }

    /// True when the lock was built from invalid arguments.
    pub fn is_config(&self) -> bool {
        matches!(self, LockError::Config(_))
    }

    /// The underlying store error, if this is a transport/backend fault.
    pub fn store_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            LockError::Store(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}
