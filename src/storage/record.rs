//! Typed Records
//!
//! A key holds exactly one [`Record`], and the record's variant fixes which
//! command family may touch it. Every payload element is an already-canonical
//! string.

use std::collections::{HashMap, HashSet, VecDeque};

/// The type of a record, as reported by `TYPE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    String,
    List,
    Hash,
    Set,
}

impl RecordKind {
    /// The name the emulated service uses for this type.
    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::String => "string",
            RecordKind::List => "list",
            RecordKind::Hash => "hash",
            RecordKind::Set => "set",
        }
    }
}

/// The value stored under one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    String(String),
    List(VecDeque<String>),
    Hash(FieldMap),
    Set(HashSet<String>),
}

impl Record {
    /// Creates a string record.
    pub fn string(s: impl Into<String>) -> Self {
        Record::String(s.into())
    }

    pub fn empty_list() -> Self {
        Record::List(VecDeque::new())
    }

    pub fn empty_hash() -> Self {
        Record::Hash(FieldMap::new())
    }

    pub fn empty_set() -> Self {
        Record::Set(HashSet::new())
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            Record::String(_) => RecordKind::String,
            Record::List(_) => RecordKind::List,
            Record::Hash(_) => RecordKind::Hash,
            Record::Set(_) => RecordKind::Set,
        }
    }

    /// True for an aggregate with no elements left.
    ///
    /// Strings are never considered empty: `""` is a valid value.
    pub fn is_empty_aggregate(&self) -> bool {
        match self {
            Record::String(_) => false,
            Record::List(list) => list.is_empty(),
            Record::Hash(map) => map.is_empty(),
            Record::Set(set) => set.is_empty(),
        }
    }

    pub fn as_string(&self) -> Option<&String> {
        match self {
            Record::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_string_mut(&mut self) -> Option<&mut String> {
        match self {
            Record::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&VecDeque<String>> {
        match self {
            Record::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut VecDeque<String>> {
        match self {
            Record::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_hash(&self) -> Option<&FieldMap> {
        match self {
            Record::Hash(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_hash_mut(&mut self) -> Option<&mut FieldMap> {
        match self {
            Record::Hash(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&HashSet<String>> {
        match self {
            Record::Set(set) => Some(set),
            _ => None,
        }
    }

    pub fn as_set_mut(&mut self) -> Option<&mut HashSet<String>> {
        match self {
            Record::Set(set) => Some(set),
            _ => None,
        }
    }
}

/// A field -> value map that iterates in insertion order.
///
/// Overwriting a field keeps its position; removing a field keeps the relative
/// order of the rest. Lookups go through a hash index.
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, returning the previous value if there was one.
    pub fn insert(&mut self, field: String, value: String) -> Option<String> {
        match self.index.get(&field) {
            Some(&pos) => Some(std::mem::replace(&mut self.entries[pos].1, value)),
            None => {
                self.index.insert(field.clone(), self.entries.len());
                self.entries.push((field, value));
                None
            }
        }
    }

    pub fn get(&self, field: &str) -> Option<&String> {
        self.index.get(field).map(|&pos| &self.entries[pos].1)
    }

    pub fn contains_key(&self, field: &str) -> bool {
        self.index.contains_key(field)
    }

    /// Removes a field, returning its value.
    pub fn remove(&mut self, field: &str) -> Option<String> {
        let pos = self.index.remove(field)?;
        let (_, value) = self.entries.remove(pos);
        for (name, _) in &self.entries[pos..] {
            if let Some(slot) = self.index.get_mut(name) {
                *slot -= 1;
            }
        }
        Some(value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(field, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }
}

// Equality ignores insertion order, like comparing two dicts.
impl PartialEq for FieldMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl Eq for FieldMap {}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = FieldMap::new();
        for (k, v) in iter {
            map.insert(k.into(), v.into());
        }
        map
    }
}
