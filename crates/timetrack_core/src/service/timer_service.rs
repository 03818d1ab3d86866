//! Timer tracker use-case service.
//!
//! # Responsibility
//! - Map presentation events (create, edit, remove, start/stop) to store
//!   operations.
//! - Own the tick scheduler lifecycle for one tracker instance.
//!
//! # Invariants
//! - Service APIs never bypass store operations.
//! - Unknown IDs are silent no-ops; callers get the unchanged snapshot.
//! - Dropping the service stops its scheduler.

use crate::config::{ConfigError, TrackerConfig};
use crate::model::timer::TimerId;
use crate::scheduler::tick::{SchedulerError, TickScheduler};
use crate::store::snapshot::Snapshot;
use crate::store::timer_store::{SnapshotReceiver, TimerStore};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use tokio::runtime::Handle;

/// Errors from building or starting a tracker service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    Config(ConfigError),
    Scheduler(SchedulerError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Scheduler(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Scheduler(err) => Some(err),
        }
    }
}

impl From<ConfigError> for ServiceError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<SchedulerError> for ServiceError {
    fn from(value: SchedulerError) -> Self {
        Self::Scheduler(value)
    }
}

/// Full attribute set submitted by an edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerAttributes {
    /// Timer being edited.
    pub id: TimerId,
    pub title: String,
    pub project: String,
}

/// One tracker instance: a store plus the scheduler that advances it.
#[derive(Debug)]
pub struct TimerService {
    store: TimerStore,
    scheduler: TickScheduler,
}

impl TimerService {
    /// Creates an idle service over an empty collection.
    pub fn new(config: &TrackerConfig) -> Result<Self, ServiceError> {
        Self::with_snapshot(config, Snapshot::default())
    }

    /// Creates an idle service over a seeded collection.
    ///
    /// # Errors
    /// - Returns `ServiceError::Config` when `config` fails validation.
    pub fn with_snapshot(config: &TrackerConfig, initial: Snapshot) -> Result<Self, ServiceError> {
        config.validate()?;
        let store = TimerStore::with_snapshot(initial);
        let scheduler = TickScheduler::new(store.clone(), config.tick_interval())?;
        Ok(Self { store, scheduler })
    }

    /// Starts ticking on the ambient tokio runtime.
    pub fn start(&mut self) -> Result<(), ServiceError> {
        self.scheduler.start()?;
        Ok(())
    }

    /// Starts ticking on an explicit runtime.
    pub fn start_on(&mut self, runtime: &Handle) {
        self.scheduler.start_on(runtime);
    }

    /// Stops ticking. Safe to call when already stopped.
    pub fn stop(&mut self) {
        self.scheduler.stop();
    }

    pub fn is_ticking(&self) -> bool {
        self.scheduler.is_active()
    }

    /// Handles a create-form submit and returns the new timer's ID.
    pub fn on_create_submit(
        &self,
        title: impl Into<String>,
        project: impl Into<String>,
    ) -> TimerId {
        let snapshot = self.store.create(title, project);
        let id = snapshot[0].id;
        info!(
            "event=timer_created module=service status=ok timer_id={id} count={}",
            snapshot.len()
        );
        id
    }

    /// Handles an edit-form submit.
    pub fn on_edit_submit(&self, attrs: &TimerAttributes) -> Snapshot {
        self.store
            .update_attributes(attrs.id, attrs.title.as_str(), attrs.project.as_str())
    }

    /// Handles a remove press.
    pub fn on_remove(&self, id: TimerId) -> Snapshot {
        let snapshot = self.store.remove(id);
        info!(
            "event=timer_removed module=service status=ok timer_id={id} count={}",
            snapshot.len()
        );
        snapshot
    }

    /// Handles a start or stop press; both map to the same toggle.
    pub fn on_start_stop_toggle(&self, id: TimerId) -> Snapshot {
        self.store.toggle_running(id)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.store.snapshot()
    }

    pub fn subscribe(&self) -> SnapshotReceiver {
        self.store.subscribe()
    }

    /// Returns a handle to the underlying store.
    pub fn store(&self) -> &TimerStore {
        &self.store
    }
}
