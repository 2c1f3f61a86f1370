//! Cross-process locking through a shared key-value store.
//!
//! Per key, the store moves between two states:
//!
//! ```text
//! FREE    --try_lock (token T)-->  HELD(T)
//! HELD(T) --unlock (token T)---->  FREE
//! HELD(T) --expire elapses------>  FREE      (store-driven)
//! HELD(T) --try_lock (any)------>  HELD(T)   (AlreadyLocked)
//! HELD(T) --unlock (token != T)->  HELD(T)   (no-op)
//! ```
//!
//! ## Backends
//!
//! - [`MemoryLockStore`]: in-process map with lazy TTL (always available)
//! - `RedisLockStore`: `SET NX EX` plus a Lua compare-and-delete (feature: `redis`)
//!
//! No fencing tokens or lease renewal: a holder paused past its expiry can
//! act after the store has reassigned the key.

mod lock;
mod memory;
mod store;

#[cfg(feature = "redis")]
mod redis;

pub use lock::{generate_token, DistributedLock, DistributedLockBuilder, MAX_EXPIRE_SECS};
pub use memory::MemoryLockStore;
pub use store::LockStore;

#[cfg(feature = "redis")]
pub use self::redis::RedisLockStore;
