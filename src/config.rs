use std::time::Duration;

use serde::Deserialize;

use crate::lock::ChannelLock;

/// Prefix joined with the lock name (`"<prefix>:<name>"`) to form store keys.
pub const DEFAULT_KEY_PREFIX: &str = "redis_lock";

/// Expiry applied when a distributed lock is built with `expire_secs == 0`.
pub const DEFAULT_EXPIRE_SECS: u64 = 10;

/// Tunables shared by the locks in this crate.
///
/// Every field has a default, so an empty JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LockConfig {
    pub key_prefix: String,
    pub default_expire_secs: u64,
    pub channel_timeout_ms: u64,
}

impl Default for LockConfig {
    fn default() -> Self {
        LockConfig {
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            default_expire_secs: DEFAULT_EXPIRE_SECS,
            channel_timeout_ms: 10,
        }
    }
}

impl LockConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn channel_timeout(&self) -> Duration {
        Duration::from_millis(self.channel_timeout_ms)
    }

    /// A [`ChannelLock`] whose `try_lock` waits for the configured timeout.
    pub fn channel_lock(&self) -> ChannelLock {
        ChannelLock::with_default_timeout(self.channel_timeout())
    }
}
