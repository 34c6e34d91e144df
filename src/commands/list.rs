//! List Commands
//!
//! - `LPUSH key value` / `RPUSH key value`
//! - `LPOP key` / `RPOP key` / `LLEN key`
//! - `LRANGE key start stop` / `LINDEX key index`
//! - `LSET key index value` / `LREM key count value` / `LTRIM key start stop`
//!
//! Indices follow the usual convention: `0` is the head, `-1` the tail.
//! Ranges are inclusive on both ends and clamp to the list instead of failing.
//!
//! ```text
//!  index:   0     1     2     3
//!         ┌─────┬─────┬─────┬─────┐
//!         │  a  │  b  │  c  │  d  │
//!         └─────┴─────┴─────┴─────┘
//!  from end: -4    -3    -2    -1
//! ```

use crate::client::MockRedis;
use crate::error::{Result, StoreError};
use crate::storage::Record;
use crate::value::Value;
use std::collections::VecDeque;

impl MockRedis {
    /// LPUSH key value
    ///
    /// Returns the length of the list after the push.
    pub fn lpush(&self, key: &str, value: impl Into<Value>) -> Result<usize> {
        let value = value.into().canonical();
        let mut engine = self.engine();
        let list = engine
            .get_or_insert_with(key, Record::empty_list)
            .as_list_mut()
            .ok_or(StoreError::WrongType)?;

        list.push_front(value);
        Ok(list.len())
    }

    /// RPUSH key value
    ///
    /// Returns the length of the list after the push.
    pub fn rpush(&self, key: &str, value: impl Into<Value>) -> Result<usize> {
        let value = value.into().canonical();
        let mut engine = self.engine();
        let list = engine
            .get_or_insert_with(key, Record::empty_list)
            .as_list_mut()
            .ok_or(StoreError::WrongType)?;

        list.push_back(value);
        Ok(list.len())
    }

    /// LPOP key
    ///
    /// Returns `None` for a missing key. Popping the last element removes the
    /// key.
    pub fn lpop(&self, key: &str) -> Result<Option<String>> {
        self.pop(key, VecDeque::pop_front)
    }

    /// RPOP key
    pub fn rpop(&self, key: &str) -> Result<Option<String>> {
        self.pop(key, VecDeque::pop_back)
    }

    /// LLEN key
    pub fn llen(&self, key: &str) -> Result<usize> {
        self.read_list(key, VecDeque::len)
            .map(Option::unwrap_or_default)
    }

    /// LRANGE key start stop
    ///
    /// Both bounds are inclusive. A negative bound counts from the tail; an
    /// out-of-range bound is clamped, and an empty window yields an empty
    /// result.
    pub fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<String>> {
        self.read_list(key, |list| match normalize_range(start, stop, list.len()) {
            None => Vec::new(),
            Some((start, stop)) => list.range(start..=stop).cloned().collect(),
        })
        .map(Option::unwrap_or_default)
    }

    /// LINDEX key index
    pub fn lindex(&self, key: &str, index: i64) -> Result<Option<String>> {
        self.read_list(key, |list| {
            resolve_index(index, list.len()).and_then(|i| list.get(i).cloned())
        })
        .map(Option::flatten)
    }

    /// LSET key index value
    ///
    /// Fails with `NoSuchKey` on a missing key and `IndexOutOfRange` when
    /// `index` falls outside the list.
    pub fn lset(&self, key: &str, index: i64, value: impl Into<Value>) -> Result<()> {
        let value = value.into().canonical();
        let mut engine = self.engine();
        let list = engine
            .get_mut(key)
            .ok_or(StoreError::NoSuchKey)?
            .as_list_mut()
            .ok_or(StoreError::WrongType)?;

        let index = resolve_index(index, list.len()).ok_or(StoreError::IndexOutOfRange)?;
        list[index] = value;
        Ok(())
    }

    /// LREM key count value
    ///
    /// Removes up to `|count|` elements equal to `value`: from the head when
    /// `count > 0`, from the tail when `count < 0`, and all of them when
    /// `count == 0`. Returns the number removed.
    pub fn lrem(&self, key: &str, count: i64, value: impl Into<Value>) -> Result<usize> {
        let value = value.into().canonical();
        let mut engine = self.engine();
        let removed = match engine.get_mut(key) {
            None => return Ok(0),
            Some(record) => {
                let list = record.as_list_mut().ok_or(StoreError::WrongType)?;
                remove_matching(list, count, &value)
            }
        };

        engine.remove_if_empty(key);
        Ok(removed)
    }

    /// LTRIM key start stop
    ///
    /// Keeps only the elements inside the inclusive window. An empty window
    /// removes the key.
    pub fn ltrim(&self, key: &str, start: i64, stop: i64) -> Result<()> {
        let mut engine = self.engine();
        match engine.get_mut(key) {
            None => return Ok(()),
            Some(record) => {
                let list = record.as_list_mut().ok_or(StoreError::WrongType)?;
                match normalize_range(start, stop, list.len()) {
                    None => list.clear(),
                    Some((start, stop)) => {
                        list.truncate(stop + 1);
                        list.drain(..start);
                    }
                }
            }
        }

        engine.remove_if_empty(key);
        Ok(())
    }

    fn pop(
        &self,
        key: &str,
        take: fn(&mut VecDeque<String>) -> Option<String>,
    ) -> Result<Option<String>> {
        let mut engine = self.engine();
        let popped = match engine.get_mut(key) {
            None => return Ok(None),
            Some(record) => take(record.as_list_mut().ok_or(StoreError::WrongType)?),
        };

        engine.remove_if_empty(key);
        Ok(popped)
    }

    fn read_list<T>(
        &self,
        key: &str,
        read: impl FnOnce(&VecDeque<String>) -> T,
    ) -> Result<Option<T>> {
        let mut engine = self.engine();
        match engine.get(key) {
            None => Ok(None),
            Some(record) => record
                .as_list()
                .map(read)
                .map(Some)
                .ok_or(StoreError::WrongType),
        }
    }
}

/// Resolves an inclusive `[start, stop]` window against a list of `len`
/// elements.
///
/// A negative bound becomes `len + bound`; `start` then clamps at 0 and
/// `stop` at `len - 1`. Returns `None` when the window is empty.
fn normalize_range(start: i64, stop: i64, len: usize) -> Option<(usize, usize)> {
    let len = i64::try_from(len).ok()?;
    if len == 0 {
        return None;
    }

    let start = if start < 0 {
        len.saturating_add(start).max(0)
    } else {
        start
    };
    let stop = if stop < 0 {
        len.saturating_add(stop)
    } else {
        stop.min(len - 1)
    };

    if start > stop || start >= len {
        return None;
    }
    Some((usize::try_from(start).ok()?, usize::try_from(stop).ok()?))
}

/// Resolves a single, possibly negative, index.
fn resolve_index(index: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let index = if index < 0 { len.saturating_add(index) } else { index };
    if (0..len).contains(&index) {
        usize::try_from(index).ok()
    } else {
        None
    }
}

fn remove_matching(list: &mut VecDeque<String>, count: i64, value: &str) -> usize {
    let limit = match count {
        0 => usize::MAX,
        n => usize::try_from(n.unsigned_abs()).unwrap_or(usize::MAX),
    };

    let mut removed = 0;
    if count >= 0 {
        let mut i = 0;
        while i < list.len() && removed < limit {
            if list[i] == value {
                list.remove(i);
                removed += 1;
            } else {
                i += 1;
            }
        }
    } else {
        let mut i = list.len();
        while i > 0 && removed < limit {
            i -= 1;
            if list[i] == value {
                list.remove(i);
                removed += 1;
            }
        }
    }
    removed
}
