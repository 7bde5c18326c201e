//! Latest classified snapshot, shared between the poller and consumers.
//!
//! The store owns the current [`ClassifiedSnapshot`] and replaces it
//! atomically. Subscribers are called synchronously, in registration order,
//! after every successful replacement.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock, Weak};

use chrono::{DateTime, Utc};

use crate::domain::ClassifiedSnapshot;

type Listener = Arc<dyn Fn(&Arc<ClassifiedSnapshot>) + Send + Sync>;

/// Returned when an update originates from an older fetch than the one
/// already stored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("stale snapshot: sequence {rejected} is not newer than stored {current}")]
pub struct StaleSnapshot {
    pub rejected: u64,
    pub current: u64,
}

/// The most recent failed refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastError {
    /// Fetch sequence number of the failed cycle.
    pub sequence: u64,
    pub message: String,
    pub at: DateTime<Utc>,
}

#[derive(Default)]
struct StoreState {
    current: Option<Arc<ClassifiedSnapshot>>,
    last_error: Option<LastError>,
    listeners: Vec<(u64, Listener)>,
    next_listener_id: u64,
}

#[derive(Default)]
struct Shared {
    state: RwLock<StoreState>,
    /// Serializes replace-and-notify so subscribers see updates in order.
    notify: Mutex<()>,
    /// Last fetch sequence number handed out.
    sequence: AtomicU64,
}

/// Thread-safe holder for the latest snapshot.
///
/// Cheap to clone; clones share the same snapshot and subscribers.
#[derive(Clone, Default)]
pub struct SnapshotStore {
    shared: Arc<Shared>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the sequence number for a new fetch.
    ///
    /// Numbers come from the store so every producer writing to it, including
    /// a poller created after an earlier one was dropped, stays ordered.
    pub fn next_sequence(&self) -> u64 {
        self.shared.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// The latest snapshot, or `None` before the first successful fetch.
    pub fn current(&self) -> Option<Arc<ClassifiedSnapshot>> {
        self.read().current.clone()
    }

    /// Number of empty stations in the current snapshot.
    pub fn empty_count(&self) -> Option<usize> {
        self.read().current.as_ref().map(|s| s.empty_count())
    }

    /// Number of e-bike-only stations in the current snapshot.
    pub fn ebike_only_count(&self) -> Option<usize> {
        self.read().current.as_ref().map(|s| s.ebike_only_count())
    }

    /// The most recent failure, cleared by the next successful update.
    pub fn last_error(&self) -> Option<LastError> {
        self.read().last_error.clone()
    }

    /// Replace the current snapshot and notify subscribers.
    ///
    /// Rejects a snapshot whose sequence is not newer than the stored one,
    /// leaving the store untouched. Listeners must not call `update` from
    /// inside the callback.
    pub fn update(
        &self,
        snapshot: ClassifiedSnapshot,
    ) -> Result<Arc<ClassifiedSnapshot>, StaleSnapshot> {
        let _notify = self
            .shared
            .notify
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let snapshot = Arc::new(snapshot);
        let listeners: Vec<Listener> = {
            let mut state = self.write();

            if let Some(current) = &state.current
                && snapshot.sequence <= current.sequence
            {
                return Err(StaleSnapshot {
                    rejected: snapshot.sequence,
                    current: current.sequence,
                });
            }

            state.current = Some(Arc::clone(&snapshot));
            state.last_error = None;
            state.listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
        };

        for listener in listeners {
            listener(&snapshot);
        }

        Ok(snapshot)
    }

    /// Record a failed refresh. The current snapshot is not touched.
    ///
    /// Ignored if a newer fetch has already succeeded.
    pub fn record_error(&self, sequence: u64, message: impl Into<String>) {
        let mut state = self.write();

        if state
            .current
            .as_ref()
            .is_some_and(|current| current.sequence >= sequence)
        {
            return;
        }

        state.last_error = Some(LastError {
            sequence,
            message: message.into(),
            at: Utc::now(),
        });
    }

    /// Register a listener for snapshot replacements.
    ///
    /// The listener stays registered until the returned [`Subscription`] is
    /// dropped or [`Subscription::unsubscribe`] is called.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Arc<ClassifiedSnapshot>) + Send + Sync + 'static,
    {
        let mut state = self.write();
        let id = state.next_listener_id;
        state.next_listener_id += 1;
        state.listeners.push((id, Arc::new(listener)));

        Subscription {
            id,
            shared: Arc::downgrade(&self.shared),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.read().listeners.len()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, StoreState> {
        self.shared
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, StoreState> {
        self.shared
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Handle for a registered listener. Unsubscribes on drop.
#[must_use = "dropping a Subscription unsubscribes the listener"]
pub struct Subscription {
    id: u64,
    shared: Weak<Shared>,
}

impl Subscription {
    /// Unsubscribe explicitly. Equivalent to dropping the handle.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(shared) = self.shared.upgrade() else {
            return;
        };
        let mut state = shared.state.write().unwrap_or_else(PoisonError::into_inner);
        state.listeners.retain(|(id, _)| *id != self.id);
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
