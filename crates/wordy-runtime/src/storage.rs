#![forbid(unsafe_code)]

//! Cross-context key-value storage with change notification.
//!
//! [`ExtensionStorage`] models the extension's persistent storage: values
//! are JSON, grouped by [`AreaName`], and every handle cloned from the same
//! store sees the same data. Each handle plays the part of one execution
//! context (the content script, the settings panel).
//!
//! # Semantics
//!
//! 1. A write that does not change the stored value emits no change event.
//! 2. Change events carry the area, the key, and the old and new values.
//! 3. [`ExtensionStorage::watch`] captures the current value and registers
//!    the subscriber under one lock, so no change falls between the two.
//! 4. Watchers whose receiver was dropped are pruned on the next write.
//! 5. The `managed` area is read-only.
//!
//! Persistence goes through a [`StorageBackend`]: [`MemoryStorage`] by
//! default, `FileStorage` (one JSON file per area) with the
//! `state-persistence` feature.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

/// Storage area, named after `chrome.storage` areas.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AreaName {
    #[default]
    Local,
    Sync,
    Session,
    Managed,
}

impl AreaName {
    pub const ALL: [AreaName; 4] = [Self::Local, Self::Sync, Self::Session, Self::Managed];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Sync => "sync",
            Self::Session => "session",
            Self::Managed => "managed",
        }
    }

    /// Whether extension code may write to this area.
    #[must_use]
    pub const fn is_writable(self) -> bool {
        !matches!(self, Self::Managed)
    }
}

impl fmt::Display for AreaName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every key stored in one area.
pub type AreaSnapshot = BTreeMap<String, Value>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("storage lock poisoned")]
    Poisoned,
    #[error("storage area `{0}` is read-only")]
    ReadOnly(AreaName),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Where area contents are persisted.
pub trait StorageBackend: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Load an area. A never-written area is empty, not an error.
    fn load_area(&self, area: AreaName) -> StorageResult<AreaSnapshot>;

    /// Replace an area's persisted contents.
    fn save_area(&self, area: AreaName, entries: &AreaSnapshot) -> StorageResult<()>;
}

/// Volatile backend.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    areas: Mutex<HashMap<AreaName, AreaSnapshot>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend pre-populated with `entries` in `area`.
    #[must_use]
    pub fn with_area(area: AreaName, entries: AreaSnapshot) -> Self {
        let mut areas = HashMap::new();
        areas.insert(area, entries);
        Self {
            areas: Mutex::new(areas),
        }
    }
}

impl StorageBackend for MemoryStorage {
    fn name(&self) -> &str {
        "memory"
    }

    fn load_area(&self, area: AreaName) -> StorageResult<AreaSnapshot> {
        let areas = self.areas.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(areas.get(&area).cloned().unwrap_or_default())
    }

    fn save_area(&self, area: AreaName, entries: &AreaSnapshot) -> StorageResult<()> {
        let mut areas = self.areas.lock().map_err(|_| StorageError::Poisoned)?;
        areas.insert(area, entries.clone());
        Ok(())
    }
}

#[cfg(feature = "state-persistence")]
pub use file::FileStorage;

#[cfg(feature = "state-persistence")]
mod file {
    use std::path::{Path, PathBuf};

    use super::{AreaName, AreaSnapshot, StorageBackend, StorageResult};

    /// One pretty-printed JSON file per area under a directory.
    ///
    /// Writes go to a temp file that is then renamed over the target.
    #[derive(Debug, Clone)]
    pub struct FileStorage {
        dir: PathBuf,
    }

    impl FileStorage {
        pub fn new(dir: impl Into<PathBuf>) -> Self {
            Self { dir: dir.into() }
        }

        pub fn dir(&self) -> &Path {
            &self.dir
        }

        /// The file backing `area`.
        #[must_use]
        pub fn path_for(&self, area: AreaName) -> PathBuf {
            self.dir.join(format!("{}.json", area.as_str()))
        }
    }

    impl StorageBackend for FileStorage {
        fn name(&self) -> &str {
            "file"
        }

        fn load_area(&self, area: AreaName) -> StorageResult<AreaSnapshot> {
            let path = self.path_for(area);
            if !path.exists() {
                return Ok(AreaSnapshot::new());
            }
            let text = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&text)?)
        }

        fn save_area(&self, area: AreaName, entries: &AreaSnapshot) -> StorageResult<()> {
            std::fs::create_dir_all(&self.dir)?;
            let path = self.path_for(area);
            let temp = path.with_extension("json.tmp");
            std::fs::write(&temp, serde_json::to_string_pretty(entries)?)?;
            std::fs::rename(&temp, &path)?;
            Ok(())
        }
    }
}

/// One key changed in one area.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageChange {
    pub area: AreaName,
    pub key: String,
    pub old_value: Option<Value>,
    pub new_value: Option<Value>,
}

impl StorageChange {
    #[must_use]
    pub fn is_for(&self, area: AreaName, key: &str) -> bool {
        self.area == area && self.key == key
    }
}

struct StoreState {
    areas: HashMap<AreaName, AreaSnapshot>,
    watchers: Vec<Sender<StorageChange>>,
}

struct StoreInner {
    backend: Box<dyn StorageBackend>,
    state: Mutex<StoreState>,
}

/// Shared storage handle. Clones share data and watchers.
#[derive(Clone)]
pub struct ExtensionStorage {
    inner: Arc<StoreInner>,
}

impl fmt::Debug for ExtensionStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionStorage")
            .field("backend", &self.inner.backend.name())
            .finish_non_exhaustive()
    }
}

impl ExtensionStorage {
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                backend: Box::new(backend),
                state: Mutex::new(StoreState {
                    areas: HashMap::new(),
                    watchers: Vec::new(),
                }),
            }),
        }
    }

    /// A store backed by [`MemoryStorage`].
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }

    pub fn backend_name(&self) -> &str {
        self.inner.backend.name()
    }

    /// Read one key.
    pub fn get(&self, area: AreaName, key: &str) -> StorageResult<Option<Value>> {
        let mut state = self.lock()?;
        let entries = self.area(&mut state, area)?;
        Ok(entries.get(key).cloned())
    }

    /// Write one key. Returns whether the stored value changed.
    pub fn set(&self, area: AreaName, key: &str, value: Value) -> StorageResult<bool> {
        self.write(area, key, Some(value))
    }

    /// Delete one key. Returns whether it existed.
    pub fn remove(&self, area: AreaName, key: &str) -> StorageResult<bool> {
        self.write(area, key, None)
    }

    /// Subscribe to every change in every area.
    pub fn subscribe(&self) -> StorageResult<Receiver<StorageChange>> {
        let (tx, rx) = mpsc::channel();
        self.lock()?.watchers.push(tx);
        Ok(rx)
    }

    /// Snapshot one key and subscribe to its later changes.
    pub fn watch(&self, area: AreaName, key: &str) -> StorageResult<StorageWatch> {
        let mut state = self.lock()?;
        let current = self.area(&mut state, area)?.get(key).cloned();
        let (tx, rx) = mpsc::channel();
        state.watchers.push(tx);
        Ok(StorageWatch {
            area,
            key: key.to_string(),
            current,
            rx,
        })
    }

    fn write(&self, area: AreaName, key: &str, value: Option<Value>) -> StorageResult<bool> {
        if !area.is_writable() {
            return Err(StorageError::ReadOnly(area));
        }
        let mut state = self.lock()?;
        let entries = self.area(&mut state, area)?;
        let old_value = entries.get(key).cloned();
        if old_value == value {
            return Ok(false);
        }

        let mut next = entries.clone();
        match &value {
            Some(v) => {
                next.insert(key.to_string(), v.clone());
            }
            None => {
                next.remove(key);
            }
        }
        if let Err(err) = self.inner.backend.save_area(area, &next) {
            warn!(area = %area, key, backend = self.backend_name(), error = %err, "storage write failed");
            return Err(err);
        }
        *entries = next;

        let change = StorageChange {
            area,
            key: key.to_string(),
            old_value,
            new_value: value,
        };
        state.watchers.retain(|tx| tx.send(change.clone()).is_ok());
        debug!(area = %area, key, watchers = state.watchers.len(), "storage changed");
        Ok(true)
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, StoreState>> {
        self.inner.state.lock().map_err(|_| StorageError::Poisoned)
    }

    fn area<'a>(
        &self,
        state: &'a mut StoreState,
        area: AreaName,
    ) -> StorageResult<&'a mut AreaSnapshot> {
        Ok(match state.areas.entry(area) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(self.inner.backend.load_area(area)?),
        })
    }
}

/// A key's value at subscription time plus its change stream.
#[derive(Debug)]
pub struct StorageWatch {
    area: AreaName,
    key: String,
    current: Option<Value>,
    rx: Receiver<StorageChange>,
}

impl StorageWatch {
    pub fn area(&self) -> AreaName {
        self.area
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The value when the watch was created.
    pub fn initial(&self) -> Option<&Value> {
        self.current.as_ref()
    }

    /// Next pending change for this key, without blocking.
    pub fn try_next(&self) -> Option<StorageChange> {
        loop {
            match self.rx.try_recv() {
                Ok(change) if change.is_for(self.area, &self.key) => return Some(change),
                Ok(_) => continue,
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => return None,
            }
        }
    }

    /// Every pending change for this key.
    pub fn drain(&self) -> Vec<StorageChange> {
        std::iter::from_fn(|| self.try_next()).collect()
    }
}
