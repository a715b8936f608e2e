// src/store/memory_store.rs
//
// In-memory blob store for tests and ephemeral sessions.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::AppResult;
use crate::store::BlobStore;

#[derive(Default)]
pub struct MemoryBlobStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let entries = self.entries.read().expect("store lock poisoned");
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut entries = self.entries.write().expect("store lock poisoned");
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn set_many(&self, pairs: &[(String, String)]) -> AppResult<()> {
        let mut entries = self.entries.write().expect("store lock poisoned");
        for (key, value) in pairs {
            entries.insert(key.clone(), value.clone());
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let mut entries = self.entries.write().expect("store lock poisoned");
        entries.remove(key);
        Ok(())
    }
}
