//! In-memory store backend

use dashmap::DashMap;

use super::LocalStore;

/// Volatile store keeping entries in a concurrent map.
///
/// Entries live for the lifetime of the process, matching a browser session
/// without persisted storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|v| v.value().clone())
    }

    fn write(&self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn clear(&self) {
        self.entries.clear();
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
