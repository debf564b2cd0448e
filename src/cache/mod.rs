//! In-process cache for built content
//!
//! Values are stored type-erased behind `Arc`s and handed back as clones of
//! those `Arc`s. Entries live until deleted or the cache is cleared.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

type Entry = Arc<dyn Any + Send + Sync>;

/// Key/value cache shared by the content services
#[derive(Default)]
pub struct CacheManager {
    entries: RwLock<HashMap<String, Entry>>,
}

impl CacheManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// The value under `key`, if present and of type `T`
    pub fn get<T: Any + Send + Sync>(&self, key: &str) -> Option<Arc<T>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let entry = entries.get(key)?.clone();
        entry.downcast::<T>().ok()
    }

    pub fn set<T: Any + Send + Sync>(&self, key: impl Into<String>, value: Arc<T>) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.into(), value);
    }

    pub fn delete(&self, key: &str) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
    }

    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for CacheManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheManager")
            .field("entries", &self.len())
            .finish()
    }
}
