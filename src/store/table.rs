//! One write-through collection.
//!
//! A `Table` owns the in-memory sequence for a single record kind and the key
//! it is mirrored to. Every mutation holds the table's write lock across
//! copy → apply → validate → persist → commit → notify, so:
//! - mutations on one collection never interleave
//! - a failed persist leaves memory untouched, keeping memory and snapshot equal
//! - commit callbacks for one collection run in commit order

use std::sync::{PoisonError, RwLock};

use tracing::{debug, info};

use crate::collection::{Collection, Placement, Record};
use crate::error::{StoreError, StoreResult};
use crate::snapshot;
use crate::storage::KeyValueStore;

#[derive(Debug)]
pub(crate) struct Table<T> {
    collection: Collection,
    key: String,
    records: RwLock<Vec<T>>,
}

impl<T: Record> Table<T> {
    /// Load from the snapshot at `key`, seeding (and persisting) when absent.
    pub(crate) fn load(
        backend: &dyn KeyValueStore,
        key: String,
        seed_on_empty: bool,
        seed: impl FnOnce() -> Vec<T>,
    ) -> StoreResult<Self> {
        let collection = T::COLLECTION;

        let records = match backend.get(&key)? {
            Some(raw) => {
                let decoded = snapshot::decode::<T>(collection, &key, &raw)?;
                if decoded.needs_migration() {
                    info!(
                        %collection,
                        from = decoded.schema_version,
                        to = snapshot::SCHEMA_VERSION,
                        "migrating snapshot"
                    );
                    backend.set(&key, &snapshot::encode(collection, &decoded.records)?)?;
                }
                decoded.records
            }
            None => {
                let records = if seed_on_empty { seed() } else { Vec::new() };
                backend.set(&key, &snapshot::encode(collection, &records)?)?;
                info!(%collection, count = records.len(), "initialized collection");
                records
            }
        };

        Ok(Self {
            collection,
            key,
            records: RwLock::new(records),
        })
    }

    pub(crate) fn key(&self) -> &str {
        &self.key
    }

    /// Fresh copy of every record, in stored order. Never fails: a poisoned
    /// lock still guards the last committed state.
    pub(crate) fn snapshot(&self) -> Vec<T> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn find(&self, id: &str) -> Option<T> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|r| r.id() == id)
            .cloned()
    }

    pub(crate) fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Apply `f` to a copy of the records; persist and commit when it reports a change.
    ///
    /// `on_commit` runs after the commit, still under the write lock.
    fn mutate(
        &self,
        backend: &dyn KeyValueStore,
        f: impl FnOnce(&mut Vec<T>) -> bool,
        on_commit: impl FnOnce(),
    ) -> StoreResult<bool> {
        let mut guard = self
            .records
            .write()
            .map_err(|_| StoreError::LockPoisoned(self.collection.name()))?;

        let mut next = guard.clone();
        if !f(&mut next) {
            return Ok(false);
        }

        next.iter().try_for_each(T::validate)?;
        let raw = snapshot::encode(self.collection, &next)?;
        backend.set(&self.key, &raw)?;
        *guard = next;
        on_commit();
        Ok(true)
    }

    pub(crate) fn insert(
        &self,
        backend: &dyn KeyValueStore,
        mut record: T,
        on_commit: impl FnOnce(),
    ) -> StoreResult<()> {
        record.apply_defaults();
        let collection = self.collection;
        self.mutate(
            backend,
            |records| {
                if records.iter().any(|r| r.id() == record.id()) {
                    debug!(%collection, id = record.id(), "duplicate id inserted");
                }
                match collection.placement() {
                    Placement::Prepend => records.insert(0, record),
                    Placement::Append => records.push(record),
                }
                true
            },
            on_commit,
        )?;
        Ok(())
    }

    /// Replace the first record with the same id.
    pub(crate) fn replace(
        &self,
        backend: &dyn KeyValueStore,
        record: T,
        on_commit: impl FnOnce(),
    ) -> StoreResult<bool> {
        self.mutate(
            backend,
            |records| match records.iter().position(|r| r.id() == record.id()) {
                Some(idx) => {
                    records[idx] = record;
                    true
                }
                None => false,
            },
            on_commit,
        )
    }

    /// Remove every record with `id`.
    pub(crate) fn remove(
        &self,
        backend: &dyn KeyValueStore,
        id: &str,
        on_commit: impl FnOnce(),
    ) -> StoreResult<bool> {
        self.mutate(
            backend,
            |records| {
                let before = records.len();
                records.retain(|r| r.id() != id);
                records.len() != before
            },
            on_commit,
        )
    }

    /// Read-modify-write the first record with `id`.
    pub(crate) fn modify(
        &self,
        backend: &dyn KeyValueStore,
        id: &str,
        f: impl FnOnce(&mut T),
        on_commit: impl FnOnce(),
    ) -> StoreResult<bool> {
        self.mutate(
            backend,
            |records| match records.iter_mut().find(|r| r.id() == id) {
                Some(record) => {
                    f(record);
                    true
                }
                None => false,
            },
            on_commit,
        )
    }
}
