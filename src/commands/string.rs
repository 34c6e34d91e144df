//! String Commands
//!
//! - `GET key` / `SET key value` / `SETEX key seconds value` / `SETNX key value`
//! - `GETSET key value` / `MGET key [key ...]`
//! - `INCR key` / `INCRBY key increment` / `DECR key` / `DECRBY key decrement`
//! - `APPEND key value` / `STRLEN key`
//!
//! Values are canonicalized on write, so `SET key True` stores `"True"`.
//! `SET` clears any TTL on the key; the counter commands and `APPEND` keep it.

use super::apply_delta;
use crate::client::MockRedis;
use crate::error::{Result, StoreError};
use crate::storage::Record;
use crate::value::Value;

impl MockRedis {
    /// GET key
    ///
    /// Returns `None` for a missing or expired key.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let mut engine = self.engine();
        match engine.get(key) {
            None => Ok(None),
            Some(record) => record
                .as_string()
                .cloned()
                .map(Some)
                .ok_or(StoreError::WrongType),
        }
    }

    /// SET key value
    ///
    /// Overwrites a record of any type and clears the key's TTL.
    pub fn set(&self, key: &str, value: impl Into<Value>) {
        let canonical = value.into().canonical();
        self.engine().put(key.to_string(), Record::String(canonical));
    }

    /// SETEX key seconds value
    pub fn setex(&self, key: &str, seconds: i64, value: impl Into<Value>) -> Result<()> {
        if seconds <= 0 {
            return Err(StoreError::InvalidExpireTime);
        }

        let canonical = value.into().canonical();
        let mut engine = self.engine();
        engine.put(key.to_string(), Record::String(canonical));
        engine.expiry_mut().set_expiry(key, seconds);
        Ok(())
    }

    /// SETNX key value
    ///
    /// Returns `true` if the key was absent and has been set.
    pub fn setnx(&self, key: &str, value: impl Into<Value>) -> bool {
        let canonical = value.into().canonical();
        let mut engine = self.engine();
        if engine.exists(key) {
            return false;
        }
        engine.put(key.to_string(), Record::String(canonical));
        true
    }

    /// GETSET key value
    ///
    /// Returns the previous string, and like `SET` clears the TTL.
    pub fn getset(&self, key: &str, value: impl Into<Value>) -> Result<Option<String>> {
        let canonical = value.into().canonical();
        let mut engine = self.engine();

        let previous = match engine.get(key) {
            None => None,
            Some(record) => Some(record.as_string().cloned().ok_or(StoreError::WrongType)?),
        };

        engine.put(key.to_string(), Record::String(canonical));
        Ok(previous)
    }

    /// MGET key [key ...]
    ///
    /// Keys that are missing or hold a non-string record yield `None`.
    pub fn mget(&self, keys: &[&str]) -> Vec<Option<String>> {
        let mut engine = self.engine();
        keys.iter()
            .map(|key| engine.get(key).and_then(Record::as_string).cloned())
            .collect()
    }

    /// INCR key
    ///
    /// A missing key counts from `"0"`. Returns the new value.
    pub fn incr(&self, key: &str) -> Result<i64> {
        self.incrby(key, 1)
    }

    /// INCRBY key increment
    pub fn incrby(&self, key: &str, amount: i64) -> Result<i64> {
        let mut engine = self.engine();
        let payload = engine
            .get_or_insert_with(key, || Record::string("0"))
            .as_string_mut()
            .ok_or(StoreError::WrongType)?;

        let next = apply_delta(payload, amount)?;
        *payload = next.to_string();
        Ok(next)
    }

    /// DECR key
    pub fn decr(&self, key: &str) -> Result<i64> {
        self.incrby(key, -1)
    }

    /// DECRBY key decrement
    pub fn decrby(&self, key: &str, amount: i64) -> Result<i64> {
        let delta = amount.checked_neg().ok_or(StoreError::Overflow)?;
        self.incrby(key, delta)
    }

    /// APPEND key value
    ///
    /// Returns the length of the string, in bytes, after the append.
    pub fn append(&self, key: &str, value: impl Into<Value>) -> Result<usize> {
        let suffix = value.into().canonical();
        let mut engine = self.engine();
        let payload = engine
            .get_or_insert_with(key, || Record::string(""))
            .as_string_mut()
            .ok_or(StoreError::WrongType)?;

        payload.push_str(&suffix);
        Ok(payload.len())
    }

    /// STRLEN key
    ///
    /// Returns 0 for a missing key.
    pub fn strlen(&self, key: &str) -> Result<usize> {
        let mut engine = self.engine();
        match engine.get(key) {
            None => Ok(0),
            Some(record) => record
                .as_string()
                .map(String::len)
                .ok_or(StoreError::WrongType),
        }
    }
}
