//! Key Commands
//!
//! - `DEL key` / `EXISTS key` / `TYPE key` / `KEYS pattern` / `RENAME key newkey`
//! - `EXPIRE key seconds` / `PEXPIRE key milliseconds` / `EXPIREAT key timestamp`
//! - `TTL key` / `PTTL key` / `PERSIST key`
//!
//! These commands work on keys of every type.

use crate::client::MockRedis;
use crate::error::Result;
use crate::storage::NO_TTL;

impl MockRedis {
    /// DEL key
    ///
    /// Returns `true` if a live key was removed.
    pub fn delete(&self, key: &str) -> bool {
        self.engine().delete(key)
    }

    /// EXISTS key
    pub fn exists(&self, key: &str) -> bool {
        self.engine().exists(key)
    }

    /// EXPIRE key seconds
    ///
    /// Returns `false` if the key does not exist. A TTL of zero or less
    /// expires the key at once.
    pub fn expire(&self, key: &str, seconds: i64) -> bool {
        self.pexpire(key, seconds.saturating_mul(1000))
    }

    /// PEXPIRE key milliseconds
    pub fn pexpire(&self, key: &str, millis: i64) -> bool {
        let mut engine = self.engine();
        if !engine.exists(key) {
            return false;
        }
        engine.expiry_mut().set_expiry_ms(key, millis);
        true
    }

    /// EXPIREAT key timestamp
    ///
    /// `timestamp` is in Unix seconds. A timestamp in the past expires the key
    /// at once.
    pub fn expireat(&self, key: &str, timestamp: i64) -> bool {
        let mut engine = self.engine();
        if !engine.exists(key) {
            return false;
        }
        let deadline_ms = u64::try_from(timestamp.saturating_mul(1000)).unwrap_or(0);
        engine.expiry_mut().set_deadline_ms(key, deadline_ms);
        true
    }

    /// TTL key
    ///
    /// Whole seconds until the key expires, or `-1` when the key has no TTL or
    /// does not exist.
    pub fn ttl(&self, key: &str) -> i64 {
        let mut engine = self.engine();
        if !engine.exists(key) {
            return NO_TTL;
        }
        engine.expiry().remaining_ttl(key)
    }

    /// PTTL key
    pub fn pttl(&self, key: &str) -> i64 {
        let mut engine = self.engine();
        if !engine.exists(key) {
            return NO_TTL;
        }
        engine.expiry().remaining_ttl_ms(key)
    }

    /// PERSIST key
    ///
    /// Returns `true` if a TTL was removed.
    pub fn persist(&self, key: &str) -> bool {
        let mut engine = self.engine();
        engine.exists(key) && engine.expiry_mut().clear(key)
    }

    /// TYPE key
    ///
    /// One of `"string"`, `"list"`, `"hash"`, `"set"`, or `"none"` for a
    /// missing key.
    pub fn type_of(&self, key: &str) -> &'static str {
        self.engine()
            .get(key)
            .map(|record| record.kind().as_str())
            .unwrap_or("none")
    }

    /// KEYS pattern
    ///
    /// Returns the matching live keys in sorted order.
    pub fn keys(&self, pattern: &str) -> Vec<String> {
        self.engine().keys(pattern)
    }

    /// RENAME key newkey
    ///
    /// Moves the record and its TTL, replacing whatever `newkey` held.
    pub fn rename(&self, from: &str, to: &str) -> Result<()> {
        self.engine().rename(from, to)
    }
}
