//! Hash Commands
//!
//! - `HSET key field value` / `HGET key field`
//! - `HMSET key field value [field value ...]` / `HMGET key field [field ...]`
//! - `HGETALL key` / `HKEYS key` / `HVALS key` / `HLEN key`
//! - `HDEL key field` / `HEXISTS key field`
//! - `HINCRBY key field increment`
//!
//! Field values are canonicalized on write. Field names are stored verbatim.
//! Fields are returned in the order they were first set.

use super::apply_delta;
use crate::client::MockRedis;
use crate::error::{Result, StoreError};
use crate::storage::{FieldMap, Record};
use crate::value::Value;

impl MockRedis {
    /// HSET key field value
    ///
    /// Returns `true` if the field is new, `false` if it was overwritten.
    pub fn hset(&self, key: &str, field: &str, value: impl Into<Value>) -> Result<bool> {
        let canonical = value.into().canonical();
        let mut engine = self.engine();
        let map = engine
            .get_or_insert_with(key, Record::empty_hash)
            .as_hash_mut()
            .ok_or(StoreError::WrongType)?;

        Ok(map.insert(field.to_string(), canonical).is_none())
    }

    /// HGET key field
    pub fn hget(&self, key: &str, field: &str) -> Result<Option<String>> {
        self.read_hash(key, |map| map.get(field).cloned())
            .map(Option::flatten)
    }

    /// HMSET key field value [field value ...]
    pub fn hmset<I, F, V>(&self, key: &str, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (F, V)>,
        F: Into<String>,
        V: Into<Value>,
    {
        let pairs: Vec<(String, String)> = pairs
            .into_iter()
            .map(|(field, value)| (field.into(), value.into().canonical()))
            .collect();

        let mut engine = self.engine();
        let map = engine
            .get_or_insert_with(key, Record::empty_hash)
            .as_hash_mut()
            .ok_or(StoreError::WrongType)?;
        for (field, value) in pairs {
            map.insert(field, value);
        }

        engine.remove_if_empty(key);
        Ok(())
    }

    /// HMGET key field [field ...]
    pub fn hmget(&self, key: &str, fields: &[&str]) -> Result<Vec<Option<String>>> {
        let values = self.read_hash(key, |map| {
            fields
                .iter()
                .map(|field| map.get(field).cloned())
                .collect::<Vec<_>>()
        })?;
        Ok(values.unwrap_or_else(|| vec![None; fields.len()]))
    }

    /// HGETALL key
    ///
    /// Returns `(field, value)` pairs in insertion order.
    pub fn hgetall(&self, key: &str) -> Result<Vec<(String, String)>> {
        self.read_hash(key, |map| {
            map.iter()
                .map(|(field, value)| (field.clone(), value.clone()))
                .collect()
        })
        .map(Option::unwrap_or_default)
    }

    /// HKEYS key
    pub fn hkeys(&self, key: &str) -> Result<Vec<String>> {
        self.read_hash(key, |map| map.iter().map(|(field, _)| field.clone()).collect())
            .map(Option::unwrap_or_default)
    }

    /// HVALS key
    pub fn hvals(&self, key: &str) -> Result<Vec<String>> {
        self.read_hash(key, |map| map.iter().map(|(_, value)| value.clone()).collect())
            .map(Option::unwrap_or_default)
    }

    /// HLEN key
    pub fn hlen(&self, key: &str) -> Result<usize> {
        self.read_hash(key, FieldMap::len)
            .map(Option::unwrap_or_default)
    }

    /// HEXISTS key field
    pub fn hexists(&self, key: &str, field: &str) -> Result<bool> {
        self.read_hash(key, |map| map.contains_key(field))
            .map(Option::unwrap_or_default)
    }

    /// HDEL key field
    ///
    /// Returns `true` if the field existed. The key is removed with its last
    /// field.
    pub fn hdel(&self, key: &str, field: &str) -> Result<bool> {
        let mut engine = self.engine();
        let removed = match engine.get_mut(key) {
            None => return Ok(false),
            Some(record) => record
                .as_hash_mut()
                .ok_or(StoreError::WrongType)?
                .remove(field)
                .is_some(),
        };

        engine.remove_if_empty(key);
        Ok(removed)
    }

    /// HINCRBY key field increment
    ///
    /// A missing key or field counts from `"0"`. Returns the new value.
    pub fn hincrby(&self, key: &str, field: &str, amount: i64) -> Result<i64> {
        let mut engine = self.engine();
        let map = engine
            .get_or_insert_with(key, Record::empty_hash)
            .as_hash_mut()
            .ok_or(StoreError::WrongType)?;

        let current = map.get(field).map(String::as_str).unwrap_or("0");
        let next = apply_delta(current, amount);

        // A failed increment must not leave a freshly created empty hash behind
        let next = match next {
            Ok(next) => next,
            Err(err) => {
                engine.remove_if_empty(key);
                return Err(err);
            }
        };

        map.insert(field.to_string(), next.to_string());
        Ok(next)
    }

    /// Runs `read` against the hash under `key`.
    ///
    /// Returns `Ok(None)` for a missing key and `WrongType` for a non-hash.
    fn read_hash<T>(&self, key: &str, read: impl FnOnce(&FieldMap) -> T) -> Result<Option<T>> {
        let mut engine = self.engine();
        match engine.get(key) {
            None => Ok(None),
            Some(record) => record
                .as_hash()
                .map(read)
                .map(Some)
                .ok_or(StoreError::WrongType),
        }
    }
}
