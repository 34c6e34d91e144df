//! Expiry Tracker
//!
//! This module keeps the per-key expiration deadlines and answers the one
//! question the key registry asks before every access: "is this key still live?"
//!
//! ## Lazy vs Active Expiry
//!
//! The tracker never removes records itself. The registry consults
//! [`ExpiryTracker::is_live`] on every access and evicts the key on the spot
//! when it is not ("lazy expiry"). [`ExpiryTracker::expired_keys`] lists every
//! key past its deadline so that the registry can also sweep them all at once
//! ("active expiry").
//!
//! ## Sentinels
//!
//! `remaining_ttl` answers `-1` both for a key without a deadline and for a key
//! the tracker has never heard of. The emulated client collapses "no expiry" and
//! "no such key" into the same reply, so there is no separate `-2`.

use crate::storage::clock::Clock;
use std::collections::HashMap;
use std::sync::Arc;

/// Sentinel returned by TTL queries when there is no deadline to report.
pub const NO_TTL: i64 = -1;

/// Tracks absolute expiration deadlines, in Unix milliseconds, per key.
#[derive(Debug)]
pub struct ExpiryTracker {
    /// Key -> deadline (ms since epoch)
    deadlines: HashMap<String, u64>,

    /// Time source for every liveness check
    clock: Arc<dyn Clock>,
}

impl ExpiryTracker {
    /// Creates an empty tracker reading time from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            deadlines: HashMap::new(),
            clock,
        }
    }

    /// Current time according to the tracker's clock.
    #[inline]
    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Expires `key` `seconds` from now.
    ///
    /// A zero or negative value sets a deadline that has already passed.
    pub fn set_expiry(&mut self, key: &str, seconds: i64) {
        self.set_expiry_ms(key, seconds.saturating_mul(1000));
    }

    /// Expires `key` `millis` milliseconds from now.
    pub fn set_expiry_ms(&mut self, key: &str, millis: i64) {
        let deadline = self.now_ms().saturating_add_signed(millis);
        self.set_deadline_ms(key, deadline);
    }

    /// Expires `key` at an absolute time.
    pub fn set_deadline_ms(&mut self, key: &str, deadline_ms: u64) {
        self.deadlines.insert(key.to_string(), deadline_ms);
    }

    /// Returns the absolute deadline of `key`, if any.
    pub fn deadline_ms(&self, key: &str) -> Option<u64> {
        self.deadlines.get(key).copied()
    }

    /// Whole seconds left before `key` expires, rounded down.
    ///
    /// Returns [`NO_TTL`] when the key has no deadline or is unknown.
    pub fn remaining_ttl(&self, key: &str) -> i64 {
        self.remaining_ms(key)
            .map(|ms| (ms / 1000) as i64)
            .unwrap_or(NO_TTL)
    }

    /// Milliseconds left before `key` expires, with the same sentinel rules
    /// as [`remaining_ttl`](Self::remaining_ttl).
    pub fn remaining_ttl_ms(&self, key: &str) -> i64 {
        self.remaining_ms(key).map(|ms| ms as i64).unwrap_or(NO_TTL)
    }

    fn remaining_ms(&self, key: &str) -> Option<u64> {
        self.deadline_ms(key)
            .map(|deadline| deadline.saturating_sub(self.now_ms()))
    }

    /// Whether `key` may still be read.
    ///
    /// A key is dead from the instant its deadline is reached. Keys without a
    /// deadline are always live.
    #[inline]
    pub fn is_live(&self, key: &str) -> bool {
        match self.deadlines.get(key) {
            Some(&deadline) => self.now_ms() < deadline,
            None => true,
        }
    }

    /// Drops the deadline of `key`.
    ///
    /// Returns `true` if there was one.
    pub fn clear(&mut self, key: &str) -> bool {
        self.deadlines.remove(key).is_some()
    }

    /// Drops every deadline.
    pub fn clear_all(&mut self) {
        self.deadlines.clear();
    }

    /// Moves the deadline of `from` (or its absence) onto `to`.
    pub fn rename(&mut self, from: &str, to: &str) {
        self.deadlines.remove(to);
        if let Some(deadline) = self.deadlines.remove(from) {
            self.deadlines.insert(to.to_string(), deadline);
        }
    }

    /// Lists every key whose deadline has passed.
    pub fn expired_keys(&self) -> Vec<String> {
        let now = self.now_ms();
        self.deadlines
            .iter()
            .filter(|(_, &deadline)| now >= deadline)
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Number of keys that carry a deadline.
    pub fn len(&self) -> usize {
        self.deadlines.len()
    }

    /// Returns true if no key carries a deadline.
    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::clock::ManualClock;
    use std::time::Duration;

    fn tracker() -> (Arc<ManualClock>, ExpiryTracker) {
        let clock = Arc::new(ManualClock::new(1_000_000));
        let tracker = ExpiryTracker::new(clock.clone());
        (clock, tracker)
    }

    #[test]
    fn test_unknown_key_is_live_without_ttl() {
        let (_, tracker) = tracker();
        assert!(tracker.is_live("missing"));
        assert_eq!(tracker.remaining_ttl("missing"), NO_TTL);
        assert_eq!(tracker.remaining_ttl_ms("missing"), NO_TTL);
    }

    #[test]
    fn test_remaining_ttl_rounds_down() {
        let (clock, mut tracker) = tracker();
        tracker.set_expiry("key", 30);
        assert_eq!(tracker.remaining_ttl("key"), 30);

        clock.advance(Duration::from_millis(1));
        assert_eq!(tracker.remaining_ttl("key"), 29);
        assert_eq!(tracker.remaining_ttl_ms("key"), 29_999);
    }

    #[test]
    fn test_key_dies_at_deadline() {
        let (clock, mut tracker) = tracker();
        tracker.set_expiry_ms("key", 500);

        clock.advance(Duration::from_millis(499));
        assert!(tracker.is_live("key"));

        clock.advance(Duration::from_millis(1));
        assert!(!tracker.is_live("key"));
        assert_eq!(tracker.expired_keys(), vec!["key".to_string()]);
    }

    #[test]
    fn test_non_positive_expiry_is_immediate() {
        let (_, mut tracker) = tracker();
        tracker.set_expiry("zero", 0);
        tracker.set_expiry("negative", -10);
        assert!(!tracker.is_live("zero"));
        assert!(!tracker.is_live("negative"));
    }

    #[test]
    fn test_clear_and_rename() {
        let (_, mut tracker) = tracker();
        tracker.set_expiry("a", 10);
        tracker.set_expiry("b", 99);

        tracker.rename("a", "b");
        assert_eq!(tracker.deadline_ms("a"), None);
        assert_eq!(tracker.remaining_ttl("b"), 10);

        assert!(tracker.clear("b"));
        assert!(!tracker.clear("b"));
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_rename_without_deadline_clears_target() {
        let (_, mut tracker) = tracker();
        tracker.set_expiry("target", 10);
        tracker.rename("source", "target");
        assert_eq!(tracker.remaining_ttl("target"), NO_TTL);
    }
}
