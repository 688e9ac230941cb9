//! Key-value persistence behind a swappable adapter.
//!
//! LocalStorage on web, an in-memory map everywhere else. The adapter is
//! injected into the bootstrap rather than reached as an ambient global, so
//! tests can run the full wiring against [`MemoryStorage`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;

/// Storage failures. There is no retry path anywhere; callers surface these
/// and stop.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The host exposes no usable storage (disabled, sandboxed, no window).
    #[error("persistent storage is unavailable")]
    Unavailable,
    /// The host refused the write (quota exceeded, storage disabled mid-run).
    #[error("storage write rejected: {0}")]
    WriteRejected(String),
}

/// Synchronous string-keyed, string-valued persistent store.
///
/// Writes are total at key granularity: `set` fully overwrites, last write
/// wins, no merging.
pub trait StorageAdapter {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store. `Clone` shares the underlying map, so a handle kept by a
/// test observes writes made through the bootstrap's handle.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageAdapter for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Browser LocalStorage, scoped to the page's origin.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn backing() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StorageError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl StorageAdapter for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::backing()?
            .get_item(key)
            .map_err(|_| StorageError::Unavailable)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::backing()?.set_item(key, value).map_err(|e| {
            StorageError::WriteRejected(e.as_string().unwrap_or_else(|| format!("{e:?}")))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_key_reads_as_none() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("missing").unwrap(), None);
    }

    #[test]
    fn set_then_get() {
        let storage = MemoryStorage::new();
        storage.set("k", "v1").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v1"));
    }

    #[test]
    fn overwrite_is_last_write_wins() {
        let storage = MemoryStorage::new();
        storage.set("k", "v1").unwrap();
        storage.set("k", "v2").unwrap();
        storage.set("k", "v3").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v3"));
    }

    #[test]
    fn clones_share_the_map() {
        let storage = MemoryStorage::new();
        let handle = storage.clone();
        storage.set("k", "v").unwrap();
        assert_eq!(handle.get("k").unwrap().as_deref(), Some("v"));
    }
}
