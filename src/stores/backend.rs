use crate::core::error::StoreError;
use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

/// Raw durable key/value storage.
///
/// A `write` must be atomic per key: a later `read` sees either the previous
/// bytes or the new bytes, never a mix.
pub trait Backend: Send {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError>;
}

/// One `<key>.json` file per key inside a directory
#[derive(Debug)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Open (and create if needed) the store directory
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            key: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Backend for FileBackend {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            key: key.to_string(),
            source,
        };

        // Temp file lives in the same directory so the rename stays on one filesystem
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(io_err)?;
        tmp.write_all(bytes).map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(self.path_for(key))
            .map_err(|e| io_err(e.error))?;
        Ok(())
    }
}

/// Process-local backend. Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a key with arbitrary bytes, bypassing serialization
    pub fn insert_raw(&self, key: &str, bytes: impl Into<Vec<u8>>) -> Result<(), StoreError> {
        self.write(key, &bytes.into())
    }
}

impl Backend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}

/// Memory backend that fails reads or writes for chosen keys
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub(crate) struct FaultyBackend {
    pub inner: MemoryBackend,
    pub unreadable: Option<&'static str>,
    pub unwritable: Option<&'static str>,
}

#[cfg(test)]
impl FaultyBackend {
    fn fault(key: &str) -> StoreError {
        StoreError::Io {
            key: key.to_string(),
            source: std::io::Error::new(ErrorKind::Other, "injected fault"),
        }
    }
}

#[cfg(test)]
impl Backend for FaultyBackend {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        if self.unreadable == Some(key) {
            return Err(Self::fault(key));
        }
        self.inner.read(key)
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        if self.unwritable == Some(key) {
            return Err(Self::fault(key));
        }
        self.inner.write(key, bytes)
    }
}
