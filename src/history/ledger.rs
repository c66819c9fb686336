//! Ledger entries accumulated while walking the history table.

use std::collections::BTreeMap;
use std::collections::btree_map;

/// One output record: field name to field value.
///
/// Keys iterate (and serialize) in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize), serde(transparent))]
pub struct Entry(BTreeMap<String, String>);

impl Entry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Set `key`, replacing any earlier value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl From<BTreeMap<String, String>> for Entry {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl IntoIterator for Entry {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Committed entries plus the one being built.
#[derive(Debug, Default)]
pub struct Ledger {
    entries: Vec<Entry>,
    pending: Entry,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit the pending entry, unless it is empty, and start a new one.
    pub fn advance(&mut self) {
        let entry = std::mem::take(&mut self.pending);
        if !entry.is_empty() {
            self.entries.push(entry);
        }
    }

    /// Write a field into the pending entry. Later writes win.
    pub fn write(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pending.insert(key, value);
    }

    /// Write several fields into the pending entry.
    pub fn write_all<K, V>(&mut self, fields: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in fields {
            self.write(key, value);
        }
    }

    /// Entries committed so far.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn pending(&self) -> &Entry {
        &self.pending
    }

    /// Commit the pending entry and return everything in commit order.
    pub fn finish(mut self) -> Vec<Entry> {
        self.advance();
        self.entries
    }
}
