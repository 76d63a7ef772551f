//! Synchronous string key-value storage
//!
//! The gallery persists exactly two records, each as a JSON string.
//! Any medium that can get and set a string by key can back it.

use std::collections::HashMap;

use crate::error::Result;

/// A synchronous get/set-by-key string store. Last write wins.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Volatile in-process store
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    records: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.records.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.records.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
