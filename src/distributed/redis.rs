//! Redis-backed [`LockStore`].
//!
//! Acquire is a single `SET key token EX <secs> NX`; a nil reply means the
//! key already exists. Release runs a Lua script so the token comparison and
//! the delete execute as one server-side step.

use std::time::Duration;

use parking_lot::Mutex;
use redis::{Client, Connection, RedisResult, Script};

use super::LockStore;
use crate::lock::StoreError;

const RELEASE_SCRIPT: &str = r#"
if redis.call("get", KEYS[1]) == ARGV[1] then
    return redis.call("del", KEYS[1])
else
    return 0
end"#;

/// [`LockStore`] over one long-lived Redis connection.
///
/// The connection is opened when the store is created, and every operation
/// is one command on it. Calls from different threads take turns on the
/// connection. If a command fails because the connection dropped, the error
/// is returned and the next call dials a fresh connection.
pub struct RedisLockStore {
    client: Client,
    conn: Mutex<Option<Connection>>,
    release: Script,
}

impl RedisLockStore {
    /// Connect with `client`. Fails if the server cannot be reached.
    pub fn new(client: Client) -> Result<Self, StoreError> {
        let conn = client.get_connection()?;
        Ok(RedisLockStore {
            client,
            conn: Mutex::new(Some(conn)),
            release: Script::new(RELEASE_SCRIPT),
        })
    }

    /// Open a client for `url` (e.g. `redis://127.0.0.1/`) and connect.
    pub fn open(url: &str) -> Result<Self, StoreError> {
        Self::new(Client::open(url)?)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    fn with_connection<T>(
        &self,
        op: impl FnOnce(&mut Connection) -> RedisResult<T>,
    ) -> Result<T, StoreError> {
        let mut slot = self.conn.lock();
        let mut conn = match slot.take() {
            Some(conn) => conn,
            None => self.client.get_connection()?,
        };
        let result = op(&mut conn);
        match &result {
            Err(err) if err.is_connection_dropped() || err.is_unrecoverable_error() => {}
            _ => *slot = Some(conn),
        }
        result.map_err(Into::into)
    }
}

impl LockStore for RedisLockStore {
    fn set_if_absent(&self, key: &str, token: &str, expire: Duration) -> Result<bool, StoreError> {
        let reply: Option<String> = self.with_connection(|conn| {
            redis::cmd("SET")
                .arg(key)
                .arg(token)
                .arg("EX")
                .arg(expire.as_secs().max(1))
                .arg("NX")
                .query(conn)
        })?;
        Ok(reply.is_some())
    }

    fn compare_and_delete(&self, key: &str, token: &str) -> Result<bool, StoreError> {
        let deleted: i64 =
            self.with_connection(|conn| self.release.key(key).arg(token).invoke(conn))?;
        Ok(deleted > 0)
    }
}
