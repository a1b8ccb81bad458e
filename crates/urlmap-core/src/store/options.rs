//! Persisted option blobs (JSON under the XDG state dir).

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Named, independently readable and writable configuration blobs.
pub trait OptionStore {
    /// Returns the stored value, or `None` if the option was never set.
    fn get_option(&self, name: &str) -> Result<Option<Value>>;

    /// Replaces the stored value.
    fn update_option(&self, name: &str, value: Value) -> Result<()>;
}

impl<T: OptionStore + ?Sized> OptionStore for &T {
    fn get_option(&self, name: &str) -> Result<Option<Value>> {
        (**self).get_option(name)
    }

    fn update_option(&self, name: &str, value: Value) -> Result<()> {
        (**self).update_option(name, value)
    }
}

/// All options in one pretty-printed JSON object on disk.
#[derive(Debug, Clone)]
pub struct JsonFileOptions {
    path: PathBuf,
}

impl JsonFileOptions {
    /// Default path for the options file: `~/.local/state/urlmap/options.json`.
    pub fn default_path() -> Result<PathBuf> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("urlmap")?;
        Ok(xdg_dirs.get_state_home().join("options.json"))
    }

    pub fn open_default() -> Result<Self> {
        Ok(Self::at(Self::default_path()?))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole file. A missing file is an empty option set.
    fn read_all(&self) -> Result<Map<String, Value>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(e).with_context(|| format!("read options: {}", self.path.display()))
            }
        };
        serde_json::from_slice(&bytes)
            .with_context(|| format!("parse options: {}", self.path.display()))
    }
}

impl OptionStore for JsonFileOptions {
    fn get_option(&self, name: &str) -> Result<Option<Value>> {
        Ok(self.read_all()?.remove(name))
    }

    fn update_option(&self, name: &str, value: Value) -> Result<()> {
        let mut all = match self.read_all() {
            Ok(all) => all,
            Err(err) => {
                tracing::warn!("replacing unreadable options file: {err:#}");
                Map::new()
            }
        };
        all.insert(name.to_string(), value);

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir: {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&all).context("serialize options")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("write options: {}", self.path.display()))?;
        Ok(())
    }
}

/// In-process option set, used for fixtures and tests.
#[derive(Debug, Default)]
pub struct MemoryOptions {
    values: Mutex<BTreeMap<String, Value>>,
}

impl MemoryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_option(self, name: &str, value: Value) -> Self {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), value);
        self
    }
}

impl OptionStore for MemoryOptions {
    fn get_option(&self, name: &str) -> Result<Option<Value>> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(name).cloned())
    }

    fn update_option(&self, name: &str, value: Value) -> Result<()> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn missing_file_reads_as_unset() {
        let dir = tempdir().unwrap();
        let store = JsonFileOptions::at(dir.path().join("options.json"));
        assert_eq!(store.get_option("mappings").unwrap(), None);
    }

    #[test]
    fn options_are_independent() {
        let dir = tempdir().unwrap();
        let store = JsonFileOptions::at(dir.path().join("nested/options.json"));
        store.update_option("mappings", json!([{"a": 1}])).unwrap();
        store.update_option("meta_keys", json!(["hero"])).unwrap();
        store.update_option("mappings", json!([])).unwrap();

        assert_eq!(store.get_option("mappings").unwrap(), Some(json!([])));
        assert_eq!(store.get_option("meta_keys").unwrap(), Some(json!(["hero"])));
    }

    #[test]
    fn corrupt_file_is_an_error_on_read_and_replaced_on_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("options.json");
        std::fs::write(&path, "{ not json").unwrap();
        let store = JsonFileOptions::at(&path);
        assert!(store.get_option("mappings").is_err());

        store.update_option("meta_keys", json!(["hero"])).unwrap();
        assert_eq!(store.get_option("meta_keys").unwrap(), Some(json!(["hero"])));
    }

    #[test]
    fn memory_options_roundtrip() {
        let store = MemoryOptions::new().with_option("a", json!(1));
        assert_eq!(store.get_option("a").unwrap(), Some(json!(1)));
        store.update_option("a", json!(2)).unwrap();
        assert_eq!(store.get_option("a").unwrap(), Some(json!(2)));
        assert_eq!(store.get_option("b").unwrap(), None);
    }
}
