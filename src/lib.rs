//! # mockkv - An In-Memory Redis Stand-In for Tests
//!
//! mockkv emulates the Redis command surface inside the test process. There is
//! no server and no socket: application code talks to a [`MockRedis`] value
//! exactly as it would talk to a client, and tests can inspect the raw records
//! afterwards.
//!
//! ## Features
//!
//! - **Redis Semantics**: strings, counters, hashes, sets and lists, with the
//!   usual index, clamping and type rules
//! - **Canonical Values**: every input is stored in its canonical string form,
//!   so `True`, `5` and `[1, '2']` read back the way a client would see them
//! - **TTL Support**: keys expire lazily on access, with an optional sweep
//! - **Deterministic Time**: a [`ManualClock`] lets tests move time forward
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                            mockkv                              │
//! │                                                                │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────────────┐ │
//! │  │   Value     │───>│  MockRedis  │───>│  Command families   │ │
//! │  │ (canonical) │    │  (Mutex)    │    │ string/hash/set/... │ │
//! │  └─────────────┘    └─────────────┘    └──────────┬──────────┘ │
//! │                                                   │            │
//! │                                                   ▼            │
//! │                     ┌──────────────────────────────────────┐   │
//! │                     │            StorageEngine             │   │
//! │                     │   records  +  ExpiryTracker  +  Clock│   │
//! │                     └──────────────────────────────────────┘   │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use mockkv::{MockRedis, Value};
//!
//! let redis = MockRedis::new();
//!
//! redis.set("key", true);
//! assert_eq!(redis.get("key").unwrap().as_deref(), Some("True"));
//!
//! redis.sadd("skey", Value::map([("a", Value::from(1)), ("b", Value::from("c"))])).unwrap();
//! assert!(redis.smembers("skey").unwrap().contains("{'a': 1, 'b': 'c'}"));
//!
//! redis.rpush("list", 5).unwrap();
//! assert_eq!(redis.lpop("list").unwrap().as_deref(), Some("5"));
//! ```
//!
//! ## Module Overview
//!
//! - [`value`]: the input value type and its canonical string form
//! - [`storage`]: key registry, TTL tracking and clocks
//! - [`commands`]: the command families
//! - [`client`]: the [`MockRedis`] facade
//! - [`config`]: store construction options
//! - [`error`]: command errors

pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod storage;
pub mod value;

// Re-export commonly used types for convenience
pub use client::MockRedis;
pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use storage::{Clock, ManualClock, Record, RecordKind, StorageStats, SystemClock};
pub use value::{canonicalize, Value};

/// Version of mockkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
