//! Immutable timer collection snapshots.
//!
//! # Responsibility
//! - Hold one ordered, point-in-time copy of the timer collection.
//! - Provide the total create/edit/remove/toggle/tick transformations.
//!
//! # Invariants
//! - Order is reverse-chronological by creation; `create` prepends.
//! - `update_attributes` never alters `elapsed` or `is_running`.
//! - `toggle_running` only flips `is_running`.
//! - `tick` only advances `elapsed` of running timers.

use crate::model::timer::{Timer, TimerId};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::sync::Arc;

/// Errors from building a snapshot out of caller-supplied timers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Two input timers share the same ID.
    DuplicateId(TimerId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "duplicate timer id in collection: {id}"),
        }
    }
}

impl Error for StoreError {}

/// Read-only, cheaply clonable view of the timer collection.
///
/// Clones share storage; every operation returns a new snapshot and leaves
/// `self` untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    timers: Arc<[Timer]>,
}

impl Snapshot {
    /// Builds a snapshot from seeded timers, keeping the given order.
    ///
    /// # Errors
    /// - Returns `StoreError::DuplicateId` when two timers share an ID.
    pub fn from_timers(timers: Vec<Timer>) -> Result<Self, StoreError> {
        let mut seen = HashSet::with_capacity(timers.len());
        for timer in &timers {
            if !seen.insert(timer.id) {
                return Err(StoreError::DuplicateId(timer.id));
            }
        }
        Ok(Self::from_vec(timers))
    }

    fn from_vec(timers: Vec<Timer>) -> Self {
        Self {
            timers: timers.into(),
        }
    }

    pub fn to_vec(&self) -> Vec<Timer> {
        self.timers.to_vec()
    }

    fn get(&self, id: TimerId) -> Option<&Timer> {
        self.timers.iter().find(|timer| timer.id == id)
    }

    pub fn contains(&self, id: TimerId) -> bool {
        self.get(id).is_some()
    }

    /// Returns whether both snapshots share the same storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.timers, &other.timers)
    }

    /// Creates a new timer via the factory and prepends it.
    pub fn create(&self, title: impl Into<String>, project: impl Into<String>) -> Self {
        self.prepend(Timer::new(title, project))
    }

    // Callers only pass fresh factory output, so uniqueness holds.
    fn prepend(&self, timer: Timer) -> Self {
        let mut timers = Vec::with_capacity(self.timers.len() + 1);
        timers.push(timer);
        timers.extend_from_slice(&self.timers);
        Self::from_vec(timers)
    }

    /// Replaces `title` and `project` of the matching timer.
    pub fn update_attributes(
        &self,
        id: TimerId,
        title: impl Into<String>,
        project: impl Into<String>,
    ) -> Self {
        if !self.contains(id) {
            return self.clone();
        }
        let title: String = title.into();
        let project: String = project.into();
        self.map_matching(id, |timer| Timer {
            title: title.clone(),
            project: project.clone(),
            ..timer.clone()
        })
    }

    /// Drops the matching timer; survivors keep their relative order.
    pub fn remove(&self, id: TimerId) -> Self {
        if !self.contains(id) {
            return self.clone();
        }
        let timers = self
            .timers
            .iter()
            .filter(|timer| timer.id != id)
            .cloned()
            .collect();
        Self::from_vec(timers)
    }

    /// Flips `is_running` on the matching timer.
    pub fn toggle_running(&self, id: TimerId) -> Self {
        if !self.contains(id) {
            return self.clone();
        }
        self.map_matching(id, |timer| Timer {
            is_running: !timer.is_running,
            ..timer.clone()
        })
    }

    /// Advances `elapsed` of every running timer by `interval_ms`.
    pub fn tick(&self, interval_ms: u64) -> Self {
        if !self.timers.iter().any(|timer| timer.is_running) {
            return self.clone();
        }
        let timers = self
            .timers
            .iter()
            .map(|timer| {
                if timer.is_running {
                    Timer {
                        elapsed: timer.elapsed.saturating_add(interval_ms),
                        ..timer.clone()
                    }
                } else {
                    timer.clone()
                }
            })
            .collect();
        Self::from_vec(timers)
    }

    fn map_matching(&self, id: TimerId, f: impl Fn(&Timer) -> Timer) -> Self {
        let timers = self
            .timers
            .iter()
            .map(|timer| {
                if timer.id == id {
                    f(timer)
                } else {
                    timer.clone()
                }
            })
            .collect();
        Self::from_vec(timers)
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::from_vec(Vec::new())
    }
}

impl Deref for Snapshot {
    type Target = [Timer];

    fn deref(&self) -> &Self::Target {
        &self.timers
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a Timer;
    type IntoIter = std::slice::Iter<'a, Timer>;

    fn into_iter(self) -> Self::IntoIter {
        self.timers.iter()
    }
}
