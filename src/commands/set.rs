//! Set Commands
//!
//! - `SADD key member` / `SREM key member`
//! - `SMEMBERS key` / `SISMEMBER key member` / `SCARD key`
//!
//! Members are canonicalized on write and on lookup, so `SISMEMBER key 1`
//! finds a member added as `"1"`.

use crate::client::MockRedis;
use crate::error::{Result, StoreError};
use crate::storage::Record;
use crate::value::Value;
use std::collections::HashSet;

impl MockRedis {
    /// SADD key member
    ///
    /// Returns `true` if the member was not already present.
    pub fn sadd(&self, key: &str, member: impl Into<Value>) -> Result<bool> {
        let member = member.into().canonical();
        let mut engine = self.engine();
        let set = engine
            .get_or_insert_with(key, Record::empty_set)
            .as_set_mut()
            .ok_or(StoreError::WrongType)?;

        Ok(set.insert(member))
    }

    /// SREM key member
    ///
    /// Returns `true` if the member was present. The key is removed with its
    /// last member.
    pub fn srem(&self, key: &str, member: impl Into<Value>) -> Result<bool> {
        let member = member.into().canonical();
        let mut engine = self.engine();
        let removed = match engine.get_mut(key) {
            None => return Ok(false),
            Some(record) => record
                .as_set_mut()
                .ok_or(StoreError::WrongType)?
                .remove(&member),
        };

        engine.remove_if_empty(key);
        Ok(removed)
    }

    /// SMEMBERS key
    pub fn smembers(&self, key: &str) -> Result<HashSet<String>> {
        self.read_set(key, HashSet::clone)
            .map(Option::unwrap_or_default)
    }

    /// SISMEMBER key member
    pub fn sismember(&self, key: &str, member: impl Into<Value>) -> Result<bool> {
        let member = member.into().canonical();
        self.read_set(key, |set| set.contains(&member))
            .map(Option::unwrap_or_default)
    }

    /// SCARD key
    pub fn scard(&self, key: &str) -> Result<usize> {
        self.read_set(key, HashSet::len)
            .map(Option::unwrap_or_default)
    }

    fn read_set<T>(
        &self,
        key: &str,
        read: impl FnOnce(&HashSet<String>) -> T,
    ) -> Result<Option<T>> {
        let mut engine = self.engine();
        match engine.get(key) {
            None => Ok(None),
            Some(record) => record
                .as_set()
                .map(read)
                .map(Some)
                .ok_or(StoreError::WrongType),
        }
    }
}
