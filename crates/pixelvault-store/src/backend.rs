// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::keys::key_file_name;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreErrorCode {
    NotFound,
    Validation,
    Io,
    Unavailable,
    Internal,
}

impl StoreErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Validation => "validation_error",
            Self::Io => "io_error",
            Self::Unavailable => "storage_unavailable",
            Self::Internal => "internal_error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    pub code: StoreErrorCode,
    pub message: String,
}

impl StoreError {
    #[must_use]
    pub fn new(code: StoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for StoreError {}

/// String key/value storage with local-storage semantics.
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Removing an absent key succeeds.
    fn remove_item(&self, key: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for &S {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove_item(key)
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    items: BTreeMap<String, String>,
    fail_reads: bool,
    fail_writes: bool,
}

/// In-process storage. Clones share one map, so a test can hand a clone to
/// a store and inspect or sabotage the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent reads fail with `Unavailable`.
    pub fn set_fail_reads(&self, fail: bool) {
        if let Ok(mut state) = self.state.lock() {
            state.fail_reads = fail;
        }
    }

    /// Makes subsequent writes and removals fail with `Unavailable`.
    pub fn set_fail_writes(&self, fail: bool) {
        if let Ok(mut state) = self.state.lock() {
            state.fail_writes = fail;
        }
    }

    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.state
            .lock()
            .map(|s| s.items.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, StoreError> {
        self.state
            .lock()
            .map_err(|_| StoreError::new(StoreErrorCode::Internal, "memory storage lock poisoned"))
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let state = self.lock()?;
        if state.fail_reads {
            return Err(StoreError::new(
                StoreErrorCode::Unavailable,
                format!("read of {key} refused"),
            ));
        }
        Ok(state.items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        if state.fail_writes {
            return Err(StoreError::new(
                StoreErrorCode::Unavailable,
                format!("write of {key} refused"),
            ));
        }
        state.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        if state.fail_writes {
            return Err(StoreError::new(
                StoreErrorCode::Unavailable,
                format!("removal of {key} refused"),
            ));
        }
        state.items.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key under `root`. Writes go to a temporary
/// sibling first and are renamed into place.
#[derive(Debug, Clone)]
pub struct LocalFsStorage {
    pub root: PathBuf,
}

impl LocalFsStorage {
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        key_file_name(key)
            .map(|name| self.root.join(name))
            .ok_or_else(|| {
                StoreError::new(
                    StoreErrorCode::Validation,
                    format!("storage key `{key}` is not a valid file name"),
                )
            })
    }
}

impl KeyValueStorage for LocalFsStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::new(
                StoreErrorCode::Io,
                format!("read {}: {e}", path.display()),
            )),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root).map_err(|e| {
            StoreError::new(
                StoreErrorCode::Io,
                format!("create {}: {e}", self.root.display()),
            )
        })?;
        let tmp = self.root.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, value.as_bytes())
            .map_err(|e| StoreError::new(StoreErrorCode::Io, format!("write {}: {e}", tmp.display())))?;
        fs::rename(&tmp, &path).map_err(|e| {
            StoreError::new(
                StoreErrorCode::Io,
                format!("rename into {}: {e}", path.display()),
            )
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::new(
                StoreErrorCode::Io,
                format!("remove {}: {e}", path.display()),
            )),
        }
    }
}

/// Reads and decodes `key`. Missing, unreadable and malformed values all
/// degrade to `T::default()`.
pub(crate) fn read_json_or_default<T, S>(storage: &S, key: &str) -> T
where
    T: DeserializeOwned + Default,
    S: KeyValueStorage + ?Sized,
{
    let raw = match storage.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(err) => {
            warn!(key, error = %err, "storage read failed, using empty value");
            return T::default();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            warn!(key, error = %err, "stored value is malformed, using empty value");
            T::default()
        }
    }
}

pub(crate) fn write_json<T, S>(storage: &S, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
    S: KeyValueStorage + ?Sized,
{
    let raw = serde_json::to_string(value)
        .map_err(|e| StoreError::new(StoreErrorCode::Internal, format!("encode {key}: {e}")))?;
    storage.set_item(key, &raw)
}
