//! Command Layer
//!
//! This module implements the Redis-compatible commands on top of the key
//! registry. Every family is an `impl MockRedis` block in its own file; each
//! command locks the engine once, so it runs atomically.
//!
//! ## Architecture
//!
//! ```text
//! Application code under test
//!       │
//!       ▼
//! ┌─────────────────┐
//! │   MockRedis     │  (client module)
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ Command family  │  (this module)
//! │                 │
//! │  - Canonicalize │
//! │  - Type check   │
//! │  - Execute      │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ StorageEngine   │  (storage module)
//! └─────────────────┘
//! ```
//!
//! ## Supported Commands
//!
//! ### String Commands
//! - `GET`, `SET`, `SETEX`, `SETNX`, `GETSET`, `MGET`
//! - `INCR`, `INCRBY`, `DECR`, `DECRBY`
//! - `APPEND`, `STRLEN`
//!
//! ### Hash Commands
//! - `HSET`, `HGET`, `HMSET`, `HMGET`, `HGETALL`, `HDEL`
//! - `HEXISTS`, `HLEN`, `HKEYS`, `HVALS`, `HINCRBY`
//!
//! ### Set Commands
//! - `SADD`, `SREM`, `SMEMBERS`, `SISMEMBER`, `SCARD`
//!
//! ### List Commands
//! - `LPUSH`, `RPUSH`, `LPOP`, `RPOP`, `LLEN`
//! - `LRANGE`, `LINDEX`, `LSET`, `LREM`, `LTRIM`
//!
//! ### Key Commands
//! - `DEL`, `EXISTS`, `TYPE`, `KEYS`, `RENAME`
//! - `EXPIRE`, `PEXPIRE`, `EXPIREAT`, `TTL`, `PTTL`, `PERSIST`
//!
//! ## Type Discipline
//!
//! A command for one record type fails with
//! [`StoreError::WrongType`](crate::StoreError::WrongType) on a key holding
//! another type. `SET` and `SETEX` overwrite whatever the key held.

pub mod hash;
pub mod keys;
pub mod list;
pub mod set;
pub mod string;

use crate::error::{Result, StoreError};

/// Parses a stored payload as a counter.
///
/// Surrounding ASCII whitespace is ignored, then an optional sign and one or
/// more ASCII digits are required. Leading zeros are accepted.
pub(crate) fn parse_integer(payload: &str) -> Result<i64> {
    let trimmed = payload.trim_matches(|c: char| c.is_ascii_whitespace());
    let digits = trimmed
        .strip_prefix(|c: char| c == '+' || c == '-')
        .unwrap_or(trimmed);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(StoreError::NotAnInteger);
    }

    trimmed.parse().map_err(|_| StoreError::NotAnInteger)
}

/// Adds `delta` to the integer stored in `payload`.
pub(crate) fn apply_delta(payload: &str, delta: i64) -> Result<i64> {
    parse_integer(payload)?
        .checked_add(delta)
        .ok_or(StoreError::Overflow)
}
