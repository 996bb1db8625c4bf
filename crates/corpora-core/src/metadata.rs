//! Ordered key/value collections.
//!
//! The same structure backs both query filters and ingestion metadata: an
//! ordered list of string pairs that materializes into a JSON object on
//! demand. Duplicate keys are allowed in the list; materialization is
//! last-write-wins per key, iterating in first-occurrence order.

use serde_json::{Map, Value};

/// A single key/value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

/// Ordered collection of key/value pairs.
#[derive(Debug, Clone, Default)]
pub struct KeyValueSet {
    entries: Vec<KeyValue>,
}

impl KeyValueSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair. No-op when either side is empty.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if key.is_empty() || value.is_empty() {
            return;
        }
        self.entries.push(KeyValue { key, value });
    }

    /// Remove the pair at `index`. Out-of-range indexes are ignored.
    pub fn remove(&mut self, index: usize) {
        if index < self.entries.len() {
            self.entries.remove(index);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyValue> {
        self.entries.iter()
    }

    /// Materialize into a JSON object.
    ///
    /// Later entries overwrite earlier ones with the same key; the object
    /// keeps the insertion order of each key's first occurrence.
    pub fn to_object(&self) -> Map<String, Value> {
        let mut map = Map::new();
        for entry in &self.entries {
            map.insert(entry.key.clone(), Value::String(entry.value.clone()));
        }
        map
    }
}
