//! Key/value store backed by a JSON file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use pomgen_core::{
    application::{
        ApplicationError,
        ports::{Filesystem, KeyValueStore, KeyValueStoreFactory},
    },
    domain::{KeyPath, document},
    error::{PomgenError, PomgenResult},
};
use serde_json::{Map, Value};
use tracing::debug;

/// One JSON document on disk.
///
/// Every operation reads the file afresh; a missing file is an empty
/// object. Writes are pretty-printed and skipped when the document did not
/// change, so rerunning against an up-to-date file leaves it untouched.
pub struct JsonFileStore {
    filesystem: Arc<dyn Filesystem>,
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(filesystem: Arc<dyn Filesystem>, path: impl Into<PathBuf>) -> Self {
        Self {
            filesystem,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> PomgenResult<Value> {
        if !self.filesystem.exists(&self.path) {
            return Ok(Value::Object(Map::new()));
        }
        let text = self.filesystem.read_to_string(&self.path)?;
        if text.trim().is_empty() {
            return Ok(Value::Object(Map::new()));
        }
        serde_json::from_str(&text).map_err(|e| self.store_error(e.to_string()))
    }

    fn write_document(&self, document: &Value) -> PomgenResult<()> {
        let mut text =
            serde_json::to_string_pretty(document).map_err(|e| self.store_error(e.to_string()))?;
        text.push('\n');
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_file(&self.path, &text)
    }

    fn store_error(&self, reason: String) -> PomgenError {
        ApplicationError::ConfigStore {
            path: self.path.clone(),
            reason,
        }
        .into()
    }
}

impl KeyValueStore for JsonFileStore {
    fn load(&self, key: &KeyPath) -> PomgenResult<Value> {
        let document = self.read_document()?;
        Ok(document::get(&document, key).cloned().unwrap_or(Value::Null))
    }

    fn store(&self, key: &KeyPath, value: Value) -> PomgenResult<()> {
        self.store_padded(key, value, Value::Null)
    }

    fn store_padded(&self, key: &KeyPath, value: Value, padding: Value) -> PomgenResult<()> {
        let before = self.read_document()?;
        let mut after = before.clone();
        document::set(&mut after, key, value, &padding)?;
        if after == before && self.filesystem.exists(&self.path) {
            return Ok(());
        }
        debug!(path = %self.path.display(), key = %key, "Storing value");
        self.write_document(&after)
    }

    fn exists(&self, key: &KeyPath) -> PomgenResult<bool> {
        Ok(document::get(&self.read_document()?, key).is_some())
    }

    fn array_size(&self, key: &KeyPath) -> PomgenResult<usize> {
        Ok(document::array_len(&self.read_document()?, key)?)
    }
}

/// Opens a [`JsonFileStore`] per path, all over one filesystem.
#[derive(Clone)]
pub struct JsonStoreFactory {
    filesystem: Arc<dyn Filesystem>,
}

impl JsonStoreFactory {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }
}

impl KeyValueStoreFactory for JsonStoreFactory {
    fn open(&self, path: &Path) -> PomgenResult<Box<dyn KeyValueStore>> {
        Ok(Box::new(JsonFileStore::new(Arc::clone(&self.filesystem), path)))
    }
}
