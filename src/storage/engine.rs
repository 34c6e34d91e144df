//! Key Registry
//!
//! This module implements the core mapping from key to typed [`Record`].
//! It enforces the lifecycle rules every command relies on:
//!
//! 1. **Lazy Expiry**: every accessor asks the [`ExpiryTracker`] whether the key
//!    is live first. A dead key is evicted on the spot and the accessor behaves
//!    as if it had never existed.
//! 2. **Exclusive Ownership**: records never leave the registry by reference
//!    across a command boundary. Snapshots hand out clones.
//! 3. **No Empty Aggregates**: a list, hash or set that loses its last element
//!    is removed, so `EXISTS` and `TYPE` never see it.
//! 4. **Writes Reset Expiry**: [`StorageEngine::put`] replaces a record and its
//!    deadline together.
//!
//! The registry takes `&mut self` everywhere and has no internal locking. The
//! [`MockRedis`](crate::MockRedis) facade wraps it in a single mutex.

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::storage::expiry::ExpiryTracker;
use crate::storage::record::Record;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, trace};

/// The keyed record store.
///
/// # Example
///
/// ```
/// use mockkv::storage::{Record, StorageEngine};
///
/// let mut engine = StorageEngine::new();
/// engine.put("name".to_string(), Record::string("Ariz"));
/// assert_eq!(engine.get("name"), Some(&Record::string("Ariz")));
///
/// engine.expiry_mut().set_expiry("name", 0);
/// assert_eq!(engine.get("name"), None);
/// ```
pub struct StorageEngine {
    /// Live (and not yet evicted) records
    records: HashMap<String, Record>,

    /// Deadlines for the keys in `records`
    expiry: ExpiryTracker,

    /// Active sweep cadence in commands, if enabled
    sweep_every: Option<u32>,

    /// Commands seen since the last active sweep
    commands_since_sweep: u32,

    /// Statistics: commands executed
    command_count: u64,

    /// Statistics: keys removed because their TTL lapsed
    expired_count: u64,

    /// Statistics: active sweeps run
    sweep_count: u64,
}

impl std::fmt::Debug for StorageEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageEngine")
            .field("records", &self.records.len())
            .field("with_ttl", &self.expiry.len())
            .field("command_count", &self.command_count)
            .field("expired_count", &self.expired_count)
            .finish()
    }
}

impl Default for StorageEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageEngine {
    /// Creates an empty registry on the system clock, with lazy expiry only.
    pub fn new() -> Self {
        Self::with_config(&StoreConfig::default())
    }

    /// Creates an empty registry from a configuration.
    pub fn with_config(config: &StoreConfig) -> Self {
        Self {
            records: HashMap::new(),
            expiry: ExpiryTracker::new(config.clock.clone()),
            sweep_every: config.sweep_every,
            commands_since_sweep: 0,
            command_count: 0,
            expired_count: 0,
            sweep_count: 0,
        }
    }

    /// Removes `key` if its deadline has passed.
    ///
    /// Returns `true` if the key was dead.
    fn evict_if_expired(&mut self, key: &str) -> bool {
        if self.expiry.is_live(key) {
            return false;
        }

        self.expiry.clear(key);
        if self.records.remove(key).is_some() {
            self.expired_count += 1;
            trace!(key, "evicted expired key on access");
        }
        true
    }

    /// Returns the record stored under `key`.
    pub fn get(&mut self, key: &str) -> Option<&Record> {
        self.evict_if_expired(key);
        self.records.get(key)
    }

    /// Returns the record stored under `key` for in-place mutation.
    ///
    /// Callers that may empty an aggregate must follow up with
    /// [`remove_if_empty`](Self::remove_if_empty).
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Record> {
        self.evict_if_expired(key);
        self.records.get_mut(key)
    }

    /// Returns the record under `key`, creating it with `make` when absent.
    ///
    /// A freshly created record carries no TTL.
    pub fn get_or_insert_with(&mut self, key: &str, make: impl FnOnce() -> Record) -> &mut Record {
        self.evict_if_expired(key);
        self.records.entry(key.to_string()).or_insert_with(make)
    }

    /// Stores `record` under `key`, replacing any record and clearing its TTL.
    ///
    /// Returns the replaced record, if there was a live one.
    pub fn put(&mut self, key: String, record: Record) -> Option<Record> {
        self.evict_if_expired(&key);
        self.expiry.clear(&key);
        self.records.insert(key, record)
    }

    /// Removes `key` and its TTL.
    ///
    /// Returns `true` if a live record was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        self.evict_if_expired(key);
        self.expiry.clear(key);
        self.records.remove(key).is_some()
    }

    /// Checks whether `key` holds a live record.
    pub fn exists(&mut self, key: &str) -> bool {
        self.evict_if_expired(key);
        self.records.contains_key(key)
    }

    /// Deletes `key` if it holds an aggregate with no elements.
    pub fn remove_if_empty(&mut self, key: &str) -> bool {
        let empty = self
            .records
            .get(key)
            .map(Record::is_empty_aggregate)
            .unwrap_or(false);
        if empty {
            self.records.remove(key);
            self.expiry.clear(key);
        }
        empty
    }

    /// Moves the record and TTL of `from` to `to`, replacing whatever `to` held.
    pub fn rename(&mut self, from: &str, to: &str) -> Result<()> {
        if !self.exists(from) {
            return Err(StoreError::NoSuchKey);
        }
        if from == to {
            return Ok(());
        }
        self.evict_if_expired(to);

        if let Some(record) = self.records.remove(from) {
            self.records.insert(to.to_string(), record);
            self.expiry.rename(from, to);
        }
        Ok(())
    }

    /// Clears all records and all TTL state.
    ///
    /// This is what `FLUSHDB` does.
    pub fn flush(&mut self) {
        let removed = self.records.len();
        self.records.clear();
        self.expiry.clear_all();
        debug!(removed, "flushed database");
    }

    /// The TTL bookkeeping for the registry's keys.
    pub fn expiry(&self) -> &ExpiryTracker {
        &self.expiry
    }

    /// Mutable access to the TTL bookkeeping.
    ///
    /// Only set deadlines on keys that exist; the registry assumes every
    /// deadline belongs to a record.
    pub fn expiry_mut(&mut self) -> &mut ExpiryTracker {
        &mut self.expiry
    }

    /// Number of live keys.
    pub fn len(&self) -> usize {
        self.records
            .keys()
            .filter(|key| self.expiry.is_live(key))
            .count()
    }

    /// Returns true if no live key exists.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns all live keys matching a glob pattern, sorted.
    ///
    /// Supported patterns:
    /// - `*` matches any run of characters
    /// - `?` matches exactly one character
    /// - `[abc]`, `[a-z]`, `[^a]` match one character from a class
    /// - `\x` matches `x` literally
    pub fn keys(&self, pattern: &str) -> Vec<String> {
        let pattern = GlobPattern::new(pattern);
        let mut keys: Vec<String> = self
            .records
            .keys()
            .filter(|key| self.expiry.is_live(key) && pattern.matches(key))
            .cloned()
            .collect();
        keys.sort();
        keys
    }

    /// Copies every live record.
    pub fn snapshot(&self) -> BTreeMap<String, Record> {
        self.records
            .iter()
            .filter(|(key, _)| self.expiry.is_live(key))
            .map(|(key, record)| (key.clone(), record.clone()))
            .collect()
    }

    /// Removes every key whose deadline has passed.
    ///
    /// # Returns
    ///
    /// Returns the number of keys that were cleaned up.
    pub fn cleanup_expired(&mut self) -> u64 {
        let mut cleaned = 0u64;
        for key in self.expiry.expired_keys() {
            self.expiry.clear(&key);
            if self.records.remove(&key).is_some() {
                cleaned += 1;
            }
        }

        self.expired_count += cleaned;
        self.sweep_count += 1;

        if cleaned > 0 {
            debug!(
                expired = cleaned,
                keys_remaining = self.records.len(),
                "expired keys cleaned up"
            );
        }

        cleaned
    }

    /// Records one command execution and runs an active sweep when one is due.
    pub fn on_command(&mut self) {
        self.command_count += 1;

        let Some(every) = self.sweep_every else {
            return;
        };
        self.commands_since_sweep += 1;
        if self.commands_since_sweep >= every {
            self.commands_since_sweep = 0;
            self.cleanup_expired();
        }
    }

    /// Returns registry statistics.
    pub fn stats(&self) -> StorageStats {
        StorageStats {
            keys: self.len() as u64,
            keys_with_ttl: self.expiry.len() as u64,
            commands: self.command_count,
            expired: self.expired_count,
            sweeps: self.sweep_count,
        }
    }
}

/// Registry statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageStats {
    /// Number of live keys
    pub keys: u64,
    /// Number of keys carrying a deadline (may include lapsed, unswept ones)
    pub keys_with_ttl: u64,
    /// Total commands executed
    pub commands: u64,
    /// Total keys removed because their TTL lapsed
    pub expired: u64,
    /// Total active sweeps run
    pub sweeps: u64,
}

/// Glob matcher for the KEYS command.
///
/// The pattern is parsed once. Matching walks the text left to right and, on a
/// mismatch, resumes from the most recent `*` with one more character
/// consumed, so it runs in O(pattern * text).
struct GlobPattern {
    /// `None` for a pattern with an unterminated `[` class, which matches nothing
    tokens: Option<Vec<GlobToken>>,
}

enum GlobToken {
    Star,
    AnyChar,
    Literal(char),
    Class { negate: bool, items: Vec<ClassItem> },
}

enum ClassItem {
    Char(char),
    Range(char, char),
}

impl GlobToken {
    fn matches(&self, c: char) -> bool {
        match self {
            GlobToken::Star | GlobToken::AnyChar => true,
            GlobToken::Literal(literal) => *literal == c,
            GlobToken::Class { negate, items } => {
                let hit = items.iter().any(|item| match *item {
                    ClassItem::Char(member) => member == c,
                    ClassItem::Range(lo, hi) => lo <= c && c <= hi,
                });
                hit != *negate
            }
        }
    }
}

impl GlobPattern {
    fn new(pattern: &str) -> Self {
        Self {
            tokens: parse_glob(&pattern.chars().collect::<Vec<_>>()),
        }
    }

    fn matches(&self, text: &str) -> bool {
        let Some(tokens) = &self.tokens else {
            return false;
        };
        let text: Vec<char> = text.chars().collect();

        let (mut p, mut t) = (0, 0);
        // (index of the last `*`, text position it currently resumes from)
        let mut resume: Option<(usize, usize)> = None;

        while t < text.len() {
            match tokens.get(p) {
                Some(GlobToken::Star) => {
                    resume = Some((p, t));
                    p += 1;
                    continue;
                }
                Some(token) if token.matches(text[t]) => {
                    p += 1;
                    t += 1;
                    continue;
                }
                _ => {}
            }

            match resume {
                Some((star, from)) => {
                    resume = Some((star, from + 1));
                    p = star + 1;
                    t = from + 1;
                }
                None => return false,
            }
        }

        tokens[p..].iter().all(|token| matches!(token, GlobToken::Star))
    }
}

fn parse_glob(pattern: &[char]) -> Option<Vec<GlobToken>> {
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < pattern.len() {
        match pattern[i] {
            '*' => {
                // Consecutive stars behave as one
                if !matches!(tokens.last(), Some(GlobToken::Star)) {
                    tokens.push(GlobToken::Star);
                }
                i += 1;
            }
            '?' => {
                tokens.push(GlobToken::AnyChar);
                i += 1;
            }
            '\\' if i + 1 < pattern.len() => {
                tokens.push(GlobToken::Literal(pattern[i + 1]));
                i += 2;
            }
            '[' => {
                let (token, next) = parse_class(pattern, i + 1)?;
                tokens.push(token);
                i = next;
            }
            literal => {
                tokens.push(GlobToken::Literal(literal));
                i += 1;
            }
        }
    }

    Some(tokens)
}

/// Parses a character class starting right after its `[`.
///
/// Returns the token and the index after the closing `]`, or `None` for an
/// unterminated class.
fn parse_class(pattern: &[char], start: usize) -> Option<(GlobToken, usize)> {
    let negate = pattern.get(start) == Some(&'^');
    let mut i = start + usize::from(negate);
    let mut items = Vec::new();

    while i < pattern.len() && pattern[i] != ']' {
        if pattern[i] == '\\' && i + 1 < pattern.len() {
            items.push(ClassItem::Char(pattern[i + 1]));
            i += 2;
        } else if i + 2 < pattern.len() && pattern[i + 1] == '-' && pattern[i + 2] != ']' {
            let (a, b) = (pattern[i], pattern[i + 2]);
            items.push(ClassItem::Range(a.min(b), a.max(b)));
            i += 3;
        } else {
            items.push(ClassItem::Char(pattern[i]));
            i += 1;
        }
    }

    if i >= pattern.len() {
        return None;
    }
    Some((GlobToken::Class { negate, items }, i + 1))
}
