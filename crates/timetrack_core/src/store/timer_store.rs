//! Owned timer state container.
//!
//! # Responsibility
//! - Own the current snapshot exclusively; all mutation routes through here.
//! - Publish each successor snapshot to every subscriber by value.
//!
//! # Invariants
//! - Every operation (including no-ops) publishes exactly one snapshot.
//! - Subscribers never receive references into internal state.
//! - Independent stores share nothing; there is no process-wide instance.

use crate::model::timer::TimerId;
use crate::store::snapshot::Snapshot;
use log::debug;
use std::sync::Arc;
use tokio::sync::watch;

/// Receiver side of the snapshot channel.
///
/// Always observes the latest published snapshot.
pub type SnapshotReceiver = watch::Receiver<Snapshot>;

/// Clonable handle to one timer state container.
///
/// Clones address the same container, so the tick scheduler and UI-facing
/// callers observe and mutate one collection.
#[derive(Debug, Clone)]
pub struct TimerStore {
    publisher: Arc<watch::Sender<Snapshot>>,
}

impl Default for TimerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerStore {
    /// Creates a store holding an empty collection.
    pub fn new() -> Self {
        Self::with_snapshot(Snapshot::default())
    }

    /// Creates a store seeded with an existing snapshot.
    pub fn with_snapshot(initial: Snapshot) -> Self {
        let (publisher, _) = watch::channel(initial);
        Self {
            publisher: Arc::new(publisher),
        }
    }

    /// Returns the current snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.publisher.borrow().clone()
    }

    /// Registers a new subscriber.
    ///
    /// The receiver starts with the current snapshot marked as seen.
    pub fn subscribe(&self) -> SnapshotReceiver {
        self.publisher.subscribe()
    }

    /// Creates a timer at the front of the collection.
    pub fn create(&self, title: impl Into<String>, project: impl Into<String>) -> Snapshot {
        let title: String = title.into();
        let project: String = project.into();
        self.apply("timer_create", |current| current.create(title, project))
    }

    /// Replaces title/project of `id`; unknown IDs leave the collection as is.
    pub fn update_attributes(
        &self,
        id: TimerId,
        title: impl Into<String>,
        project: impl Into<String>,
    ) -> Snapshot {
        let title: String = title.into();
        let project: String = project.into();
        self.apply("timer_update", |current| {
            current.update_attributes(id, title, project)
        })
    }

    /// Removes `id`; unknown IDs leave the collection as is.
    pub fn remove(&self, id: TimerId) -> Snapshot {
        self.apply("timer_remove", |current| current.remove(id))
    }

    /// Flips the run state of `id`; unknown IDs leave the collection as is.
    pub fn toggle_running(&self, id: TimerId) -> Snapshot {
        self.apply("timer_toggle", |current| current.toggle_running(id))
    }

    /// Advances every running timer by `interval_ms`.
    pub fn tick(&self, interval_ms: u64) -> Snapshot {
        self.apply("timer_tick", |current| current.tick(interval_ms))
    }

    fn apply(&self, event: &'static str, op: impl FnOnce(&Snapshot) -> Snapshot) -> Snapshot {
        let mut published = Snapshot::default();
        self.publisher.send_modify(|current| {
            let next = op(current);
            let changed = !next.ptr_eq(current);
            *current = next;
            published = current.clone();
            debug!(
                "event={event} module=store status=ok changed={changed} count={}",
                current.len()
            );
        });
        published
    }
}
