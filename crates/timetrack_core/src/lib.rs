//! Core domain logic for the timer tracker.
//! This crate is the single source of truth for timer lifecycle and
//! elapsed-time accounting.

pub mod config;
pub mod logging;
pub mod model;
pub mod scheduler;
pub mod service;
pub mod store;

pub use config::{ConfigError, TrackerConfig, DEFAULT_TICK_INTERVAL_MS};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::timer::{format_elapsed, sample_timers, Timer, TimerId, TimerValidationError};
pub use scheduler::tick::{SchedulerError, TickScheduler};
pub use service::timer_service::{ServiceError, TimerAttributes, TimerService};
pub use store::snapshot::{Snapshot, StoreError};
pub use store::timer_store::{SnapshotReceiver, TimerStore};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
