//! Persistence port.
//!
//! A raw [`KeyValueStore`] backend holds JSON strings; [`Persistence`] layers
//! typed load/save on top and turns every storage fault into a fallback:
//! loads return the caller's default and failed saves are logged, never
//! propagated.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::error::StorageResult;

/// Durable keys, one per collection.
pub mod keys {
    pub const TABS: &str = "browser.tabs";
    pub const ACTIVE_TAB: &str = "browser.activeTabId";
    pub const TAB_GROUPS: &str = "browser.tabGroups";
    pub const CLOSED_TABS: &str = "browser.closedTabs";
    pub const READING_LIST: &str = "browser.readingList";
    pub const HISTORY: &str = "browser.history";
    pub const BOOKMARKS: &str = "browser.bookmarks";
    pub const FAVORITES: &str = "browser.favorites";
    pub const PRIVACY: &str = "browser.privacy";
    pub const SETTINGS: &str = "browser.settings";

    pub const ALL: &[&str] = &[
        TABS,
        ACTIVE_TAB,
        TAB_GROUPS,
        CLOSED_TABS,
        READING_LIST,
        HISTORY,
        BOOKMARKS,
        FAVORITES,
        PRIVACY,
        SETTINGS,
    ];
}

/// Raw string key-value backend.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
    fn remove(&mut self, key: &str) -> StorageResult<()>;
    fn keys(&self) -> StorageResult<Vec<String>>;
}

/// Typed, fault-tolerant access to a [`KeyValueStore`].
pub struct Persistence {
    backend: Box<dyn KeyValueStore>,
}

impl Persistence {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// Ephemeral persistence backed by a [`MemoryStore`].
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Load `key`, returning `default` when it is missing or malformed.
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.load_opt(key).unwrap_or(default)
    }

    /// Load `key`, or `None` when it is missing or malformed.
    pub fn load_opt<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read {}: {}", key, e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Discarding malformed value under {}: {}", key, e);
                None
            }
        }
    }

    /// Whether `key` holds any value at all, well-formed or not.
    pub fn contains(&self, key: &str) -> bool {
        matches!(self.backend.get(key), Ok(Some(_)))
    }

    /// Serialize and store `value`. Failures are logged and swallowed.
    pub fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                error!("Failed to serialize {}: {}", key, e);
                return;
            }
        };

        match self.backend.set(key, &raw) {
            Ok(()) => debug!("Saved {} ({} bytes)", key, raw.len()),
            Err(e) => error!("Failed to save {}: {}", key, e),
        }
    }

    /// Delete `key`. Removing a missing key is not an error.
    pub fn remove(&mut self, key: &str) {
        if let Err(e) = self.backend.remove(key) {
            error!("Failed to remove {}: {}", key, e);
        }
    }

    /// Keys currently present in the backend.
    pub fn keys(&self) -> Vec<String> {
        self.backend.keys().unwrap_or_else(|e| {
            warn!("Failed to list keys: {}", e);
            Vec::new()
        })
    }

    /// Raw stored payload, for tests and inspection.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.backend.get(key).ok().flatten()
    }
}
