//! Key-value substrates the collection store persists into.
//!
//! The store only needs `get`/`set` on string keys. Two backends ship with
//! the crate:
//! - [`InMemoryKeyValueStore`] for tests and embedded use
//! - `FileKeyValueStore` (feature `persistent`) for durable single-process use

mod memory;
mod traits;

#[cfg(feature = "persistent")]
pub mod persistent;

pub use memory::InMemoryKeyValueStore;
pub use traits::KeyValueStore;

#[cfg(feature = "persistent")]
pub use persistent::{open_file_store, FileKeyValueStore, FileStoreConfig};
