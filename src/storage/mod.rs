// SPDX-License-Identifier: PMPL-1.0-or-later

//! Persistence of the chosen language.
//!
//! The page keeps one key/value pair (`lang` → two-letter code) in whatever
//! local storage the host offers. [`KeyValueStore`] is that seam;
//! [`MemoryStore`] backs tests and one-shot runs, [`JsonFileStore`] keeps the
//! choice between CLI invocations.

use anyhow::{anyhow, Context, Result};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// String key/value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Key/value pairs in a single JSON object on disk.
///
/// The file is read on every `get` and rewritten on every `set`, so two
/// processes sharing a file see each other's last write. A missing or
/// unreadable file reads as empty. Writing over a corrupt file replaces it,
/// but a read failure aborts the write so the other keys survive.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File contents, or `None` when there is no file yet.
    fn read_content(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        Ok(Some(content))
    }

    fn parse_map(&self, content: &str) -> Result<Map<String, Value>> {
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(content)
            .with_context(|| format!("parsing {}", self.path.display()))?
        {
            Value::Object(map) => Ok(map),
            _ => Err(anyhow!(
                "store file {} must contain a JSON object",
                self.path.display()
            )),
        }
    }

    fn read_map(&self) -> Result<Map<String, Value>> {
        match self.read_content()? {
            Some(content) => self.parse_map(&content),
            None => Ok(Map::new()),
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.read_map() {
            Ok(map) => map.get(key).and_then(Value::as_str).map(str::to_string),
            Err(err) => {
                log::warn!("event=store_read status=error error={:#}", err);
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        // A corrupt file is replaced; a file that cannot be read is left alone.
        let mut map = match self.read_content()? {
            Some(content) => self.parse_map(&content).unwrap_or_else(|err| {
                log::warn!("event=store_replace status=corrupt error={:#}", err);
                Map::new()
            }),
            None => Map::new(),
        };
        map.insert(key.to_string(), Value::String(value.to_string()));

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let payload = serde_json::to_string_pretty(&Value::Object(map))?;
        fs::write(&self.path, payload)
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("lang"), None);
        store.set("lang", "en").expect("set");
        assert_eq!(store.get("lang").as_deref(), Some("en"));
        assert_eq!(MemoryStore::with("lang", "vi").get("lang").as_deref(), Some("vi"));
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("state").join("prefs.json");

        let mut store = JsonFileStore::new(&path);
        assert_eq!(store.get("lang"), None);
        store.set("lang", "en").expect("set");
        store.set("theme", "dark").expect("set");

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.get("lang").as_deref(), Some("en"));
        assert_eq!(reopened.get("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn file_store_recovers_from_corrupt_file() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("prefs.json");
        fs::write(&path, "[not, an, object").expect("write");

        let mut store = JsonFileStore::new(&path);
        assert_eq!(store.get("lang"), None);
        store.set("lang", "vi").expect("set overwrites");
        assert_eq!(store.get("lang").as_deref(), Some("vi"));
    }

    #[test]
    fn file_store_read_error_aborts_write() {
        let dir = TempDir::new().expect("tempdir");
        // A directory at the store path fails to read as a file.
        let path = dir.path().join("prefs.json");
        fs::create_dir(&path).expect("mkdir");

        let mut store = JsonFileStore::new(&path);
        assert_eq!(store.get("lang"), None);
        let err = store.set("lang", "en").unwrap_err();
        assert!(format!("{err:#}").contains("reading"));
        assert!(path.is_dir());
    }

    #[test]
    fn non_string_values_read_as_absent() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("prefs.json");
        fs::write(&path, r#"{"lang": 7}"#).expect("write");
        assert_eq!(JsonFileStore::new(&path).get("lang"), None);
    }
}
