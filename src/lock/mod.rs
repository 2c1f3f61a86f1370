//! In-process locks.
//!
//! - [`ChannelLock`]: binary semaphore over a single-slot channel, with a
//!   timeout-bounded `try_lock`.
//! - [`ProcessMutex`]: flag + condvar mutex with an immediate `try_lock`.
//! - [`LockRegistry`]: explicitly owned map of named locks.
//!
//! Both locks share the [`Lock`] contract. Releasing a lock that is not held
//! panics; it is never silently ignored and never reported as contention.

#[cfg(feature = "async")]
mod async_channel;
mod channel;
mod error;
mod lock;
mod lock_manager;
mod mutex;

#[cfg(feature = "async")]
pub use async_channel::AsyncChannelLock;
pub use channel::{ChannelLock, DEFAULT_LOCK_TIMEOUT};
pub use error::{LockError, LockResult, StoreError};
pub use lock::{Lock, LockGuard, TimedLock};
pub use lock_manager::{LockManager, LockRegistry};
pub use mutex::ProcessMutex;
