//! Mutual-exclusion primitives at two scopes.
//!
//! In-process: [`ChannelLock`] and [`ProcessMutex`] share the [`Lock`] trait.
//! Cross-process: [`DistributedLock`] coordinates through a [`LockStore`]
//! (in-memory, or Redis with the `redis` feature).

pub mod config;
pub mod distributed;
pub mod lock;

pub use config::LockConfig;
pub use distributed::{
    generate_token, DistributedLock, DistributedLockBuilder, LockStore, MemoryLockStore,
};
#[cfg(feature = "redis")]
pub use distributed::RedisLockStore;
#[cfg(feature = "async")]
pub use lock::AsyncChannelLock;
pub use lock::{
    ChannelLock, Lock, LockError, LockGuard, LockManager, LockRegistry, LockResult, ProcessMutex,
    StoreError, TimedLock,
};
