use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use archivist_core::{
    validate_preference, PreferenceError, PreferenceKey, PreferenceStore, PreferenceValue,
};
use archivist_logging::{archivist_info, archivist_warn};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("preference directory unusable: {0}")]
    Dir(String),
    #[error("preference file is not valid RON: {0}")]
    Parse(String),
    #[error("could not encode preferences: {0}")]
    Encode(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedPreferences {
    version: u64,
    values: BTreeMap<String, String>,
}

/// Preference store kept in a RON file. Every `set` rewrites the file
/// through a temp file in the same directory, so readers never see a
/// partial write.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    values: BTreeMap<PreferenceKey, PreferenceValue>,
    version: u64,
}

impl FilePreferenceStore {
    /// Opens the store at `path`; a missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PersistError> {
        let path = path.into();
        let persisted = match fs::read_to_string(&path) {
            Ok(text) => {
                ron::from_str::<PersistedPreferences>(&text)
                    .map_err(|err| PersistError::Parse(err.to_string()))?
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => PersistedPreferences::default(),
            Err(err) => return Err(err.into()),
        };

        let mut values = BTreeMap::new();
        for (raw_key, raw_value) in &persisted.values {
            let Some(key) = PreferenceKey::parse(raw_key) else {
                archivist_warn!("Skipping unknown preference {:?} in {:?}", raw_key, path);
                continue;
            };
            let decoded = PreferenceValue::decode(key, raw_value)
                .map(|value| validate_preference(key, value));
            match decoded {
                Some(Ok(value)) => {
                    values.insert(key, value);
                }
                _ => archivist_warn!(
                    "Skipping bad value {:?} for {} in {:?}",
                    raw_value,
                    key,
                    path
                ),
            }
        }

        archivist_info!(
            "Loaded {} preferences (v{}) from {:?}",
            values.len(),
            persisted.version,
            path
        );
        Ok(Self {
            path,
            values,
            version: persisted.version,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), PersistError> {
        let persisted = PersistedPreferences {
            version: self.version,
            values: self
                .values
                .iter()
                .map(|(key, value)| (key.as_str().to_string(), value.encode()))
                .collect(),
        };
        let content = ron::ser::to_string_pretty(&persisted, ron::ser::PrettyConfig::new())
            .map_err(|err| PersistError::Encode(err.to_string()))?;
        write_atomically(&self.path, &content)
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: PreferenceKey) -> Option<PreferenceValue> {
        self.values.get(&key).copied()
    }

    fn set(&mut self, key: PreferenceKey, value: PreferenceValue) -> Result<(), PreferenceError> {
        let value = validate_preference(key, value)?;
        let previous = self.values.insert(key, value);
        self.version += 1;

        if let Err(err) = self.save() {
            // Memory and disk must agree.
            match previous {
                Some(previous) => self.values.insert(key, previous),
                None => self.values.remove(&key),
            };
            self.version -= 1;
            return Err(PreferenceError::Storage(err.to_string()));
        }
        Ok(())
    }

    fn version(&self) -> u64 {
        self.version
    }
}

fn ensure_parent_dir(path: &Path) -> Result<PathBuf, PersistError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if dir.exists() {
        if !dir.is_dir() {
            return Err(PersistError::Dir(format!("{} is not a directory", dir.display())));
        }
    } else {
        fs::create_dir_all(&dir).map_err(|err| PersistError::Dir(err.to_string()))?;
    }
    Ok(dir)
}

fn write_atomically(path: &Path, content: &str) -> Result<(), PersistError> {
    let dir = ensure_parent_dir(path)?;
    let mut tmp = NamedTempFile::new_in(&dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;
    tmp.persist(path).map_err(|err| PersistError::Io(err.error))?;
    Ok(())
}
