//! Storage Engine Module
//!
//! This module provides the typed record store behind every command: the key
//! registry, its TTL bookkeeping and the clock both of them read.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     StorageEngine                           │
//! │  ┌──────────────────────────┐  ┌─────────────────────────┐  │
//! │  │ records                  │  │ ExpiryTracker           │  │
//! │  │ key -> Record            │  │ key -> deadline (ms)    │  │
//! │  │ String | List | Hash |Set│  │                         │  │
//! │  └──────────────────────────┘  └────────────┬────────────┘  │
//! └─────────────────────────────────────────────┼───────────────┘
//!                                               │ now_ms()
//!                                     ┌─────────┴─────────┐
//!                                     │ Clock             │
//!                                     │ System | Manual   │
//!                                     └───────────────────┘
//! ```
//!
//! ## Features
//!
//! - **Typed Records**: one record type per key
//! - **Lazy Expiry**: expired keys are evicted on access
//! - **Active Expiry**: an optional sweep every N commands
//! - **Injectable Time**: tests drive expiry with a `ManualClock`
//!
//! ## Example
//!
//! ```
//! use mockkv::storage::{ManualClock, Record, StorageEngine};
//! use mockkv::StoreConfig;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let clock = Arc::new(ManualClock::new(0));
//! let mut engine = StorageEngine::with_config(&StoreConfig::default().with_clock(clock.clone()));
//!
//! engine.put("session".to_string(), Record::string("token123"));
//! engine.expiry_mut().set_expiry("session", 60);
//!
//! clock.advance(Duration::from_secs(60));
//! assert!(!engine.exists("session"));
//! ```

pub mod clock;
pub mod engine;
pub mod expiry;
pub mod record;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{StorageEngine, StorageStats};
pub use expiry::{ExpiryTracker, NO_TTL};
pub use record::{FieldMap, Record, RecordKind};
