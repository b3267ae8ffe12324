//! In-memory key/value stores for unit tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::{
    application::ports::{KeyValueStore, KeyValueStoreFactory},
    domain::{KeyPath, document},
    error::PomgenResult,
};

#[derive(Default)]
pub struct MemoryStore {
    document: Mutex<Value>,
}

impl MemoryStore {
    pub fn with_document(document: Value) -> Self {
        Self {
            document: Mutex::new(document),
        }
    }

    pub fn snapshot(&self) -> Value {
        self.document.lock().unwrap().clone()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &KeyPath) -> PomgenResult<Value> {
        Ok(document::get(&self.document.lock().unwrap(), key)
            .cloned()
            .unwrap_or(Value::Null))
    }

    fn store(&self, key: &KeyPath, value: Value) -> PomgenResult<()> {
        self.store_padded(key, value, Value::Null)
    }

    fn store_padded(&self, key: &KeyPath, value: Value, padding: Value) -> PomgenResult<()> {
        document::set(&mut self.document.lock().unwrap(), key, value, &padding)?;
        Ok(())
    }

    fn exists(&self, key: &KeyPath) -> PomgenResult<bool> {
        Ok(document::get(&self.document.lock().unwrap(), key).is_some())
    }

    fn array_size(&self, key: &KeyPath) -> PomgenResult<usize> {
        Ok(document::array_len(&self.document.lock().unwrap(), key)?)
    }
}

impl KeyValueStore for Arc<MemoryStore> {
    fn load(&self, key: &KeyPath) -> PomgenResult<Value> {
        self.as_ref().load(key)
    }

    fn store(&self, key: &KeyPath, value: Value) -> PomgenResult<()> {
        self.as_ref().store(key, value)
    }

    fn store_padded(&self, key: &KeyPath, value: Value, padding: Value) -> PomgenResult<()> {
        self.as_ref().store_padded(key, value, padding)
    }

    fn exists(&self, key: &KeyPath) -> PomgenResult<bool> {
        self.as_ref().exists(key)
    }

    fn array_size(&self, key: &KeyPath) -> PomgenResult<usize> {
        self.as_ref().array_size(key)
    }
}

/// Hands out one shared [`MemoryStore`] per path.
#[derive(Default)]
pub struct MemoryStoreFactory {
    stores: Mutex<HashMap<PathBuf, Arc<MemoryStore>>>,
}

impl MemoryStoreFactory {
    pub fn insert(&self, path: impl Into<PathBuf>, document: Value) {
        self.stores
            .lock()
            .unwrap()
            .insert(path.into(), Arc::new(MemoryStore::with_document(document)));
    }

    pub fn document(&self, path: &Path) -> Option<Value> {
        self.stores.lock().unwrap().get(path).map(|store| store.snapshot())
    }
}

impl KeyValueStoreFactory for MemoryStoreFactory {
    fn open(&self, path: &Path) -> PomgenResult<Box<dyn KeyValueStore>> {
        let store = self
            .stores
            .lock()
            .unwrap()
            .entry(path.to_path_buf())
            .or_default()
            .clone();
        Ok(Box::new(store))
    }
}
