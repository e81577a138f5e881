//! Named configuration profiles over a key-value store.

use crate::models::ModConfig;
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::BTreeMap;
use std::fs;
use thiserror::Error;

pub const PROFILE_PREFIX: &str = "fabric_profile_";

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Profile store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Profile {name} could not be (de)serialized: {source}")]
    Serialization {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid profile name: \"{0}\"")]
    InvalidName(String),
}

/// String-to-string store with single-key atomicity.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, ProfileError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), ProfileError>;
    fn remove(&mut self, key: &str) -> Result<(), ProfileError>;
    fn keys(&self) -> Result<Vec<String>, ProfileError>;
}

/// In-process store. Keys list in sorted order.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, ProfileError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ProfileError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), ProfileError> {
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, ProfileError> {
        Ok(self.entries.keys().cloned().collect())
    }
}

/// One `<key>.json` file per entry inside an existing directory.
///
/// The directory is not created on demand; if it is missing every operation
/// fails with [`ProfileError::StoreUnavailable`].
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: Utf8PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<Utf8PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    fn ensure_available(&self) -> Result<(), ProfileError> {
        if self.dir.is_dir() {
            Ok(())
        } else {
            Err(ProfileError::StoreUnavailable(format!(
                "directory {} does not exist",
                self.dir
            )))
        }
    }

    fn path_for(&self, key: &str) -> Utf8PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

fn io_unavailable(path: &Utf8Path, e: std::io::Error) -> ProfileError {
    ProfileError::StoreUnavailable(format!("{path}: {e}"))
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, ProfileError> {
        self.ensure_available()?;
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| io_unavailable(&path, e))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ProfileError> {
        self.ensure_available()?;
        let path = self.path_for(key);
        fs::write(&path, value).map_err(|e| io_unavailable(&path, e))
    }

    fn remove(&mut self, key: &str) -> Result<(), ProfileError> {
        self.ensure_available()?;
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_unavailable(&path, e)),
        }
    }

    fn keys(&self) -> Result<Vec<String>, ProfileError> {
        self.ensure_available()?;
        let entries = self
            .dir
            .read_dir_utf8()
            .map_err(|e| io_unavailable(&self.dir, e))?;

        let mut keys = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| io_unavailable(&self.dir, e))?;
            if let Some(stem) = entry.file_name().strip_suffix(".json") {
                keys.push(stem.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }
}

/// Saves, loads, lists and deletes named [`ModConfig`] snapshots.
pub struct ProfileManager<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> ProfileManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn key(name: &str) -> Result<String, ProfileError> {
        let name = name.trim();
        if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
            return Err(ProfileError::InvalidName(name.to_string()));
        }
        Ok(format!("{PROFILE_PREFIX}{name}"))
    }

    pub fn save(&mut self, name: &str, config: &ModConfig) -> Result<(), ProfileError> {
        let key = Self::key(name)?;
        let json = serde_json::to_string(config).map_err(|source| ProfileError::Serialization {
            name: name.to_string(),
            source,
        })?;
        self.store.set(&key, &json)?;
        tracing::info!("Saved profile {}", name);
        Ok(())
    }

    /// `Ok(None)` when no profile of that name exists.
    pub fn load(&self, name: &str) -> Result<Option<ModConfig>, ProfileError> {
        let key = Self::key(name)?;
        let Some(json) = self.store.get(&key)? else {
            return Ok(None);
        };
        let config = serde_json::from_str(&json).map_err(|source| ProfileError::Serialization {
            name: name.to_string(),
            source,
        })?;
        Ok(Some(config))
    }

    pub fn list_all(&self) -> Result<Vec<String>, ProfileError> {
        Ok(self
            .store
            .keys()?
            .into_iter()
            .filter_map(|key| key.strip_prefix(PROFILE_PREFIX).map(str::to_string))
            .collect())
    }

    pub fn delete(&mut self, name: &str) -> Result<(), ProfileError> {
        let key = Self::key(name)?;
        self.store.remove(&key)?;
        tracing::info!("Deleted profile {}", name);
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
