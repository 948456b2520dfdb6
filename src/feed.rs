//! Change feed.
//!
//! The store is pull-based: views re-read `get_all_*` after every mutation.
//! The feed layers push notification on top without changing that contract.
//! Publishing never blocks a writer: each subscriber has a bounded buffer and
//! events for a full subscriber are dropped and counted.
//!
//! Events are published while the collection's write lock is held, so a
//! subscriber sees each collection's changes in commit order. Events from
//! different collections may interleave in any order.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};
use tracing::warn;

use crate::collection::Collection;

/// What happened to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// Inserted by `add_*`.
    Added,
    /// Replaced by `update_*` or a status helper.
    Updated,
    /// Removed by `delete_*` or `purge_request`.
    Deleted,
}

/// A committed mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEvent {
    /// Collection that changed.
    pub collection: Collection,
    /// Kind of change.
    pub kind: ChangeKind,
    /// Id of the affected record.
    pub id: String,
    /// When the change was committed.
    pub at: DateTime<Utc>,
}

/// Receiving end of a subscription. Dropping it unsubscribes.
#[derive(Debug)]
pub struct ChangeFeed {
    rx: Receiver<StoreEvent>,
}

impl ChangeFeed {
    /// Next event if one is already queued.
    #[must_use]
    pub fn try_recv(&self) -> Option<StoreEvent> {
        self.rx.try_recv().ok()
    }

    /// Wait up to `timeout` for the next event. `None` on timeout or when the
    /// store has been dropped.
    #[must_use]
    pub fn recv_timeout(&self, timeout: Duration) -> Option<StoreEvent> {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// All events queued right now, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<StoreEvent> {
        self.rx.try_iter().collect()
    }
}

#[derive(Debug)]
pub(crate) struct FeedHub {
    capacity: usize,
    subscribers: Mutex<Vec<Sender<StoreEvent>>>,
    dropped: AtomicU64,
}

impl FeedHub {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            subscribers: Mutex::new(Vec::new()),
            dropped: AtomicU64::new(0),
        }
    }

    pub(crate) fn subscribe(&self) -> ChangeFeed {
        let (tx, rx) = bounded(self.capacity);
        let mut subs = self
            .subscribers
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        subs.push(tx);
        ChangeFeed { rx }
    }

    pub(crate) fn publish(&self, collection: Collection, kind: ChangeKind, id: &str) {
        let mut subs = self
            .subscribers
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if subs.is_empty() {
            return;
        }

        let event = StoreEvent {
            collection,
            kind,
            id: id.to_string(),
            at: Utc::now(),
        };
        subs.retain(|tx| match tx.try_send(event.clone()) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                warn!(%collection, id, "change feed subscriber full, event dropped");
                true
            }
            Err(TrySendError::Disconnected(_)) => false,
        });
    }

    #[cfg(test)]
    pub(crate) fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    pub(crate) fn dropped_events(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}
