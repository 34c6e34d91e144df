//! Store Facade
//!
//! [`MockRedis`] is the object application code talks to. It owns the
//! [`StorageEngine`] behind a single mutex, so each command runs atomically
//! even when the mock is shared between threads. The command families live in
//! the [`commands`](crate::commands) module as further `impl MockRedis` blocks.
//!
//! Besides the commands, the facade offers what test setup and whitebox
//! assertions need: `flushdb`, read-only snapshots of the raw records, and
//! `seed` for writing a record without canonicalization.

use crate::config::StoreConfig;
use crate::storage::{Clock, Record, StorageEngine, StorageStats};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// An in-memory stand-in for a Redis client.
///
/// # Example
///
/// ```
/// use mockkv::{MockRedis, Value};
///
/// let redis = MockRedis::new();
///
/// redis.set("key", true);
/// assert_eq!(redis.get("key").unwrap(), Some("True".to_string()));
///
/// redis.hset("hkey", "item", Value::seq([Value::from(1), Value::from("2")])).unwrap();
/// assert_eq!(redis.hget("hkey", "item").unwrap(), Some("[1, '2']".to_string()));
/// ```
#[derive(Debug)]
pub struct MockRedis {
    engine: Mutex<StorageEngine>,
}

impl Default for MockRedis {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRedis {
    /// Creates an empty store on the system clock.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Creates an empty store reading time from `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self::with_config(StoreConfig::default().with_clock(clock))
    }

    /// Creates an empty store from a configuration.
    pub fn with_config(config: StoreConfig) -> Self {
        debug!(sweep_every = ?config.sweep_every, "mock store created");
        Self {
            engine: Mutex::new(StorageEngine::with_config(&config)),
        }
    }

    /// Locks the engine for one command.
    ///
    /// A poisoned lock is recovered: every command validates before it
    /// mutates, so a panic cannot leave a record half-written.
    pub(crate) fn engine(&self) -> MutexGuard<'_, StorageEngine> {
        let mut engine = self.lock();
        engine.on_command();
        engine
    }

    /// Locks the engine without counting a command.
    fn lock(&self) -> MutexGuard<'_, StorageEngine> {
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Removes every key and every TTL.
    pub fn flushdb(&self) {
        self.engine().flush();
    }

    /// Number of live keys.
    pub fn dbsize(&self) -> usize {
        self.engine().len()
    }

    /// Copies every live record, keyed by name.
    pub fn snapshot(&self) -> BTreeMap<String, Record> {
        self.lock().snapshot()
    }

    /// Copies the live record stored under `key`.
    pub fn record(&self, key: &str) -> Option<Record> {
        self.lock().get(key).cloned()
    }

    /// Writes a record as-is, bypassing canonicalization.
    ///
    /// Any TTL on `key` is cleared. Seeding an empty list, hash or set removes
    /// the key instead, since the store never holds empty aggregates.
    pub fn seed(&self, key: impl Into<String>, record: Record) {
        let key = key.into();
        let mut engine = self.lock();
        engine.put(key.clone(), record);
        engine.remove_if_empty(&key);
    }

    /// Removes every expired key now instead of waiting for access.
    ///
    /// Returns the number of keys removed.
    pub fn cleanup_expired(&self) -> u64 {
        self.lock().cleanup_expired()
    }

    /// Returns registry statistics.
    pub fn stats(&self) -> StorageStats {
        self.lock().stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::ManualClock;
    use std::collections::VecDeque;
    use std::time::Duration;

    #[test]
    fn test_seed_is_raw() {
        let redis = MockRedis::new();

        redis.seed("key", Record::string("value"));
        assert_eq!(redis.get("key").unwrap(), Some("value".to_string()));

        redis.seed("list", Record::List(VecDeque::from(vec!["[]".to_string()])));
        assert_eq!(redis.lpop("list").unwrap(), Some("[]".to_string()));
    }

    #[test]
    fn test_seed_empty_aggregate_removes_key() {
        let redis = MockRedis::new();
        redis.set("key", "value");
        redis.seed("key", Record::empty_set());
        assert!(!redis.exists("key"));
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let redis = MockRedis::new();
        redis.rpush("list", 1).unwrap();

        let mut snapshot = redis.snapshot();
        if let Some(Record::List(list)) = snapshot.get_mut("list") {
            list.push_back("injected".to_string());
        }

        assert_eq!(redis.llen("list").unwrap(), 1);
        assert_eq!(
            redis.record("list"),
            Some(Record::List(VecDeque::from(vec!["1".to_string()])))
        );
    }

    #[test]
    fn test_flushdb_and_dbsize() {
        let redis = MockRedis::new();

        redis.set("a", 1);
        redis.sadd("b", 2).unwrap();
        assert_eq!(redis.dbsize(), 2);

        redis.flushdb();
        assert_eq!(redis.dbsize(), 0);
        assert!(redis.snapshot().is_empty());
    }

    #[test]
    fn test_inspection_does_not_count_as_command() {
        let redis = MockRedis::new();
        redis.set("a", 1);
        let _ = redis.snapshot();
        let _ = redis.record("a");
        assert_eq!(redis.stats().commands, 1);
    }

    #[test]
    fn test_cleanup_expired() {
        let clock = Arc::new(ManualClock::new(0));
        let redis = MockRedis::with_clock(clock.clone());

        redis.set("a", 1);
        redis.set("b", 2);
        redis.expire("a", 5);
        clock.advance(Duration::from_secs(5));

        assert_eq!(redis.cleanup_expired(), 1);
        assert_eq!(redis.stats().expired, 1);
        assert_eq!(redis.snapshot().len(), 1);
    }

    #[test]
    fn test_shared_between_threads() {
        let redis = Arc::new(MockRedis::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let redis = Arc::clone(&redis);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        redis.incr("counter").unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(redis.get("counter").unwrap(), Some("800".to_string()));
    }
}
