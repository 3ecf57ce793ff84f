use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::error::StoreError;
use super::kv::KeyValueStore;

/// Key-value store kept as one JSON object on disk.
///
/// The whole map is read once on open and rewritten on every change. Writes
/// go to a sibling temp file which is then renamed over the target.
#[derive(Debug)]
pub struct FileKeyValueStore {
    values: BTreeMap<String, String>,
    file_path: PathBuf,
}

impl FileKeyValueStore {
    /// Opens the store at `file_path`.
    ///
    /// A missing file is an empty store. A file that is not a JSON object of
    /// strings is reported as [`StoreError::Serde`].
    pub fn open(file_path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let file_path = file_path.into();
        let values = match fs::read_to_string(&file_path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(StoreError::Io(err)),
        };
        Ok(Self { values, file_path })
    }

    /// Opens the store at `file_path`, starting empty if the file is corrupt.
    ///
    /// The corrupt file is left in place until the next write replaces it.
    pub fn open_lenient(file_path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let file_path = file_path.into();
        match Self::open(file_path.clone()) {
            Err(StoreError::Serde(err)) => {
                log::warn!("ignoring unreadable storage file {}: {err}", file_path.display());
                Ok(Self {
                    values: BTreeMap::new(),
                    file_path,
                })
            }
            other => other,
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn flush(&self) -> Result<(), StoreError> {
        let dir = match self.file_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;
        let payload = serde_json::to_vec_pretty(&self.values)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(&payload)?;
        tmp.flush()?;
        tmp.persist(&self.file_path).map_err(|err| StoreError::Io(err.error))?;
        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.values.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}
