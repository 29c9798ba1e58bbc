use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{Context, Result};

/// Prefix shared by every key this crate writes, so entries never collide
/// with unrelated data in a shared preferences file.
pub const NAMESPACE: &str = "odds-cli-";

pub const PREF_AUTO_REFRESH: &str = "auto_refresh";
pub const PREF_SELECTED_LEAGUE: &str = "selected_league";

/// Raw key-value storage underneath the preference store. Implementations
/// report failures; the degrade-to-default policy lives in the store.
pub trait PreferenceBackend {
    fn read(&self, key: &str) -> Result<Option<Value>>;
    fn write(&mut self, key: &str, value: Value) -> Result<()>;
}

/// A single pretty-printed JSON object on disk.
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> Result<BTreeMap<String, Value>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = fs::read_to_string(&self.path).with_context(|| {
            format!("Failed to read preferences file {}", self.path.display())
        })?;
        let map = serde_json::from_str(&raw).with_context(|| {
            format!("Failed to parse preferences file {}", self.path.display())
        })?;
        Ok(map)
    }
}

impl PreferenceBackend for FileBackend {
    fn read(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.read_map()?.remove(key))
    }

    fn write(&mut self, key: &str, value: Value) -> Result<()> {
        // A corrupt file is abandoned rather than propagated; other entries
        // are already unreadable at that point.
        let mut map = self.read_map().unwrap_or_default();
        map.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create preferences directory {}", parent.display())
                })?;
            }
        }

        let json = serde_json::to_string_pretty(&map)?;
        fs::write(&self.path, json).with_context(|| {
            format!("Failed to write preferences file {}", self.path.display())
        })?;
        Ok(())
    }
}

/// Volatile backend for tests and headless runs.
#[derive(Default)]
pub struct MemoryBackend {
    entries: BTreeMap<String, Value>,
}

impl PreferenceBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: Value) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// Best-effort user preferences. Failures degrade to defaults and a logged
/// warning; nothing here ever reaches the UI layer as an error.
pub struct PreferenceStore {
    backend: Box<dyn PreferenceBackend>,
}

impl PreferenceStore {
    pub fn new(backend: Box<dyn PreferenceBackend>) -> Self {
        Self { backend }
    }

    pub fn with_file(path: impl AsRef<Path>) -> Self {
        Self::new(Box::new(FileBackend::new(path.as_ref())))
    }

    pub fn in_memory() -> Self {
        Self::new(Box::<MemoryBackend>::default())
    }

    fn namespaced(key: &str) -> String {
        format!("{NAMESPACE}{key}")
    }

    pub fn save<T: Serialize>(&mut self, key: &str, value: &T) {
        let value = match serde_json::to_value(value) {
            Ok(value) => value,
            Err(err) => {
                warn!("Could not encode preference {key}: {err}");
                return;
            }
        };
        if let Err(err) = self.backend.write(&Self::namespaced(key), value) {
            warn!("Could not save preference {key}: {err}");
        }
    }

    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.backend.read(&Self::namespaced(key)) {
            Ok(Some(value)) => match serde_json::from_value(value) {
                Ok(value) => value,
                Err(err) => {
                    warn!("Could not parse preference {key}: {err}");
                    default
                }
            },
            Ok(None) => default,
            Err(err) => {
                warn!("Could not load preference {key}: {err}");
                default
            }
        }
    }
}
