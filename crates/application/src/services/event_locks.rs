//! Opt-in per-event mutual exclusion
//!
//! The engine performs no concurrency control by default: overlapping
//! operations on the same event race last-writer-wins, exactly like the
//! original best-effort behavior. Callers that need stricter guarantees
//! can enable this keyed lock on the sync service; each operation then
//! holds the event's lock for its full duration.

use std::collections::HashMap;
use std::sync::Arc;

use domain::EventId;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Keyed async locks, one per event identifier
///
/// Lock entries are retained for the process lifetime; the table grows
/// with the set of events touched since startup.
#[derive(Debug, Default)]
pub struct EventLocks {
    inner: parking_lot::Mutex<HashMap<EventId, Arc<Mutex<()>>>>,
}

impl EventLocks {
    /// Create an empty lock table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for one event, waiting if another operation on
    /// the same event holds it
    pub async fn acquire(&self, id: EventId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut table = self.inner.lock();
            Arc::clone(table.entry(id).or_default())
        };
        lock.lock_owned().await
    }
}
