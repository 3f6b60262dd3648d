//! File-backed store backend

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tracing::{debug, warn};

use super::LocalStore;

/// Persistent store flushing its entries to a single JSON file.
///
/// The whole map is rewritten on every mutation through a temporary file and
/// an atomic rename, so readers never observe a half-written file. A missing
/// or unreadable file loads as an empty store.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`, loading any previously persisted entries.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = Self::load(&path);
        debug!(path = %path.display(), entries = entries.len(), "opened file store");
        Self {
            path,
            entries: RwLock::new(entries),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> HashMap<String, String> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return HashMap::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read store file, starting empty");
                return HashMap::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "corrupt store file, starting empty");
                HashMap::new()
            }
        }
    }

    // Callers hold the write lock, so flushes are serialized.
    fn flush(&self, entries: &HashMap<String, String>) {
        let raw = match serde_json::to_string(entries) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "failed to serialize store entries");
                return;
            }
        };

        let tmp = self.path.with_extension("tmp");
        if let Err(e) = fs::write(&tmp, raw) {
            warn!(path = %tmp.display(), error = %e, "failed to write store file");
            return;
        }
        if let Err(e) = fs::rename(&tmp, &self.path) {
            warn!(path = %self.path.display(), error = %e, "failed to replace store file");
        }
    }
}

impl LocalStore for FileStore {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) {
        let mut entries = self.entries.write();
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries);
    }

    fn clear(&self) {
        let mut entries = self.entries.write();
        entries.clear();
        self.flush(&entries);
    }

    fn len(&self) -> usize {
        self.entries.read().len()
    }
}
