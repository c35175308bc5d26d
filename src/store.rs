// src/store.rs
//
// Durable key-value storage for the offline copy of the roster.
// One key, one JSON document; no expiry, no versioning.

use std::{
    collections::HashMap,
    fmt, fs, io,
    path::PathBuf,
    sync::Mutex,
};

use crate::config::options::CacheOptions;
use crate::model::Snapshot;

#[derive(Debug)]
pub enum CacheError {
    Io(io::Error),
    Decode(serde_json::Error),
    Encode(serde_json::Error),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::Io(e)     => write!(f, "cache I/O error: {e}"),
            CacheError::Decode(e) => write!(f, "cached data is unreadable: {e}"),
            CacheError::Encode(e) => write!(f, "could not encode roster: {e}"),
        }
    }
}

impl std::error::Error for CacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CacheError::Io(e) => Some(e),
            CacheError::Decode(e) | CacheError::Encode(e) => Some(e),
        }
    }
}

impl From<io::Error> for CacheError {
    fn from(e: io::Error) -> Self { CacheError::Io(e) }
}

/// Minimal string key-value storage.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> io::Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> io::Result<()>;
}

/// One file per key inside `dir`.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self { Self { dir: dir.into() } }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        crate::file::ensure_directory(&self.dir)?;
        let path = self.path_for(key);

        // Write beside, then rename over: a crash never leaves half a file.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)
    }
}

/// In-memory store. Useful when nothing should touch the disk.
#[derive(Default)]
pub struct MemoryStore {
    map: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        let map = self.map.lock().map_err(|_| io::Error::other("memory store poisoned"))?;
        Ok(map.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        let map = self.map.get_mut().map_err(|_| io::Error::other("memory store poisoned"))?;
        map.insert(s!(key), s!(value));
        Ok(())
    }
}

/// Snapshot cache on top of any KeyValueStore.
pub struct LocalCache {
    store: Box<dyn KeyValueStore>,
    key: String,
}

impl LocalCache {
    pub fn new(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self { store, key: key.into() }
    }

    pub fn from_options(opts: &CacheOptions) -> Self {
        Self::new(Box::new(FileStore::new(&opts.dir)), opts.key.clone())
    }

    pub fn in_memory(key: impl Into<String>) -> Self {
        Self::new(Box::new(MemoryStore::new()), key)
    }

    pub fn key(&self) -> &str { &self.key }

    pub fn save(&mut self, snapshot: &Snapshot) -> Result<(), CacheError> {
        let json = serde_json::to_string(snapshot).map_err(CacheError::Encode)?;
        self.store.set(&self.key, &json)?;
        Ok(())
    }

    /// `Ok(None)` when nothing was ever saved.
    pub fn load(&self) -> Result<Option<Snapshot>, CacheError> {
        let Some(text) = self.store.get(&self.key)? else {
            return Ok(None);
        };
        let snapshot = serde_json::from_str(&text).map_err(CacheError::Decode)?;
        Ok(Some(snapshot))
    }
}
