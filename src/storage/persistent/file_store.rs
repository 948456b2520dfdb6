//! Snapshot-per-file key-value store.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::storage::traits::KeyValueStore;

use super::codec;
use super::file_lock::DirectoryLock;
use super::FileStoreConfig;

const SNAPSHOT_EXT: &str = "snap";
const TEMP_EXT: &str = "snap.tmp";

fn validate_key(key: &str) -> StoreResult<()> {
    let ok = !key.is_empty()
        && !key.starts_with('.')
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.'));
    if ok {
        Ok(())
    } else {
        Err(StoreError::backend(format!(
            "key '{key}' cannot be used as a snapshot file name"
        )))
    }
}

/// Durable key-value store keeping one framed snapshot file per key.
#[derive(Debug)]
pub struct FileKeyValueStore {
    dir: PathBuf,
    _lock: DirectoryLock,
    config: FileStoreConfig,
    // Serializes temp-file writes so two threads never share a temp path.
    write_guard: Mutex<()>,
}

impl FileKeyValueStore {
    /// Open or create the directory and take its lock.
    pub fn open(dir: &Path, config: FileStoreConfig) -> StoreResult<Self> {
        fs::create_dir_all(dir).map_err(|e| {
            StoreError::backend(format!(
                "failed to create snapshot directory {}: {e}",
                dir.display()
            ))
        })?;

        let lock = DirectoryLock::acquire(dir)
            .map_err(|e| StoreError::backend(format!("failed to acquire lock: {e}")))?;

        info!(dir = %dir.display(), sync_on_write = config.sync_on_write, "opened snapshot directory");

        Ok(Self {
            dir: dir.to_path_buf(),
            _lock: lock,
            config,
            write_guard: Mutex::new(()),
        })
    }

    /// The snapshot directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the snapshot file for `key`.
    #[must_use]
    pub fn snapshot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.{SNAPSHOT_EXT}"))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.{TEMP_EXT}"))
    }

    fn sync_dir(&self) -> StoreResult<()> {
        #[cfg(unix)]
        {
            File::open(&self.dir)?.sync_all()?;
        }
        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        let path = self.snapshot_path(key);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        codec::decode(&bytes)
            .map(Some)
            .map_err(|e| StoreError::CorruptSnapshot {
                key: key.to_string(),
                message: e.to_string(),
            })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        let framed = codec::encode(value)?;
        let _guard = self
            .write_guard
            .lock()
            .map_err(|_| StoreError::LockPoisoned("file.set"))?;

        let temp = self.temp_path(key);
        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp)?;
            file.write_all(&framed)?;
            if self.config.sync_on_write {
                file.sync_all()?;
            }
        }
        fs::rename(&temp, self.snapshot_path(key))?;
        if self.config.sync_on_write {
            self.sync_dir()?;
        }

        debug!(key, bytes = framed.len(), "wrote snapshot");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        match fs::remove_file(self.snapshot_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn open(dir: &Path) -> FileKeyValueStore {
        FileKeyValueStore::open(
            dir,
            FileStoreConfig {
                sync_on_write: false,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempdir().unwrap();
        {
            let kv = open(dir.path());
            kv.set("closet_craze_users", "[]").unwrap();
        }
        let kv = open(dir.path());
        assert_eq!(kv.get("closet_craze_users").unwrap().as_deref(), Some("[]"));
        assert_eq!(kv.get("closet_craze_orders").unwrap(), None);
    }

    #[test]
    fn test_second_open_is_refused() {
        let dir = tempdir().unwrap();
        let _kv = open(dir.path());
        let err = FileKeyValueStore::open(dir.path(), FileStoreConfig::default()).unwrap_err();
        assert!(err.to_string().contains("lock"));
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempdir().unwrap();
        let kv = open(dir.path());
        kv.set("products", "[1]").unwrap();
        let path = kv.snapshot_path("products");
        let mut bytes = fs::read(&path).unwrap();
        let last = bytes.len() - 5;
        bytes[last] ^= 0x55;
        fs::write(&path, bytes).unwrap();

        let err = kv.get("products").unwrap_err();
        assert!(err.is_corruption());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempdir().unwrap();
        let kv = open(dir.path());
        assert!(kv.set("../escape", "x").is_err());
        assert!(kv.set(".closet.lock", "x").is_err());
        assert!(kv.get("a/b").is_err());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let dir = tempdir().unwrap();
        let kv = open(dir.path());
        kv.set("k", "v").unwrap();
        kv.remove("k").unwrap();
        kv.remove("k").unwrap();
        assert_eq!(kv.get("k").unwrap(), None);
    }
}
