//! File-backed key-value substrate.
//!
//! One snapshot file per key inside a single directory:
//!
//! ```text
//! <dir>/
//! ├── .closet.lock                      exclusive directory lock
//! ├── closet_craze_products.snap        framed + CRC32 checked
//! ├── closet_craze_orders.snap
//! └── ...
//! ```
//!
//! Writes go to a temporary sibling and are renamed into place, so a crash
//! leaves either the previous snapshot or the new one, never a torn file.

mod codec;
mod file_lock;
mod file_store;

pub use file_lock::{DirectoryLock, LOCK_FILE_NAME};
pub use file_store::FileKeyValueStore;

use std::path::Path;

use crate::error::StoreResult;

/// Configuration for the file backend.
#[derive(Debug, Clone)]
pub struct FileStoreConfig {
    /// Whether to fsync each snapshot (and the directory) after writing.
    pub sync_on_write: bool,
}

impl Default for FileStoreConfig {
    fn default() -> Self {
        Self {
            sync_on_write: true,
        }
    }
}

/// Open or create a snapshot directory at `dir`.
///
/// # Errors
/// - If the directory cannot be created
/// - If another process holds the directory lock
///
/// # Example
/// ```rust,ignore
/// use std::sync::Arc;
/// use closet_store::{CollectionStore, StoreConfig};
/// use closet_store::storage::open_file_store;
///
/// let kv = open_file_store("./closet-data", None)?;
/// let store = CollectionStore::open(Arc::new(kv), StoreConfig::default())?;
/// ```
pub fn open_file_store(
    dir: impl AsRef<Path>,
    config: Option<FileStoreConfig>,
) -> StoreResult<FileKeyValueStore> {
    FileKeyValueStore::open(dir.as_ref(), config.unwrap_or_default())
}
