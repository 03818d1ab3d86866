//! Timer record and factory.
//!
//! # Responsibility
//! - Define the record holding identity, display metadata, accumulated
//!   duration and run state.
//! - Build new timers with generated IDs and zeroed accounting.
//!
//! # Invariants
//! - `id` is assigned once and never reused for another timer.
//! - New timers start with `elapsed == 0` and `is_running == false`.
//! - `title` is stored as submitted; blank titles are accepted here.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for one timer.
pub type TimerId = Uuid;

const MS_PER_SECOND: u64 = 1_000;
const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;

/// Validation errors for caller-supplied timer identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerValidationError {
    /// The nil UUID is reserved and never names a timer.
    NilId,
}

impl Display for TimerValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "timer id must not be the nil uuid"),
        }
    }
}

impl Error for TimerValidationError {}

/// One tracked timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    /// Stable ID assigned at creation.
    pub id: TimerId,
    /// Display title. Not validated at this layer.
    pub title: String,
    /// Display project name, may be empty.
    pub project: String,
    /// Accumulated milliseconds.
    pub elapsed: u64,
    /// Whether scheduler ticks currently advance `elapsed`.
    pub is_running: bool,
}

impl Timer {
    /// Creates a stopped timer with a freshly generated ID.
    ///
    /// # Invariants
    /// - `elapsed` starts at zero.
    /// - `is_running` starts as `false`.
    pub fn new(title: impl Into<String>, project: impl Into<String>) -> Self {
        Self::stopped(Uuid::new_v4(), title.into(), project.into())
    }

    /// Creates a stopped timer with a caller-provided ID.
    ///
    /// Used by seeding paths where identity already exists.
    pub fn with_id(
        id: TimerId,
        title: impl Into<String>,
        project: impl Into<String>,
    ) -> Result<Self, TimerValidationError> {
        if id.is_nil() {
            return Err(TimerValidationError::NilId);
        }
        Ok(Self::stopped(id, title.into(), project.into()))
    }

    fn stopped(id: TimerId, title: String, project: String) -> Self {
        Self {
            id,
            title,
            project,
            elapsed: 0,
            is_running: false,
        }
    }

    /// Returns the accumulated time as `HH:MM:SS`.
    pub fn elapsed_display(&self) -> String {
        format_elapsed(self.elapsed)
    }
}

/// Formats a millisecond count as `HH:MM:SS`.
///
/// Sub-second remainders are truncated. Hours are not wrapped at 24.
pub fn format_elapsed(elapsed_ms: u64) -> String {
    let total_seconds = elapsed_ms / MS_PER_SECOND;
    let hours = total_seconds / SECONDS_PER_HOUR;
    let minutes = (total_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let seconds = total_seconds % SECONDS_PER_MINUTE;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Demo timers a fresh tracker can be seeded with.
pub fn sample_timers() -> Vec<Timer> {
    vec![
        sample("Mow the lawn", "House Chores", 5_456_099, true),
        sample("Bake squash", "Kitchen Chores", 1_273_998, false),
        sample("Ponder stuff", "Whatever", 1_374_998, false),
    ]
}

fn sample(title: &str, project: &str, elapsed: u64, is_running: bool) -> Timer {
    let mut timer = Timer::new(title, project);
    timer.elapsed = elapsed;
    timer.is_running = is_running;
    timer
}

#[cfg(test)]
mod tests {
    use super::{format_elapsed, sample_timers};

    #[test]
    fn format_elapsed_pads_and_truncates() {
        assert_eq!(format_elapsed(0), "00:00:00");
        assert_eq!(format_elapsed(999), "00:00:00");
        assert_eq!(format_elapsed(61_000), "00:01:01");
        assert_eq!(format_elapsed(5_456_099), "01:30:56");
    }

    #[test]
    fn format_elapsed_does_not_wrap_hours() {
        assert_eq!(format_elapsed(100 * 3_600_000), "100:00:00");
    }

    #[test]
    fn sample_timers_have_one_running_entry() {
        let timers = sample_timers();
        assert_eq!(timers.len(), 3);
        assert_eq!(timers.iter().filter(|timer| timer.is_running).count(), 1);
        assert_eq!(timers[0].title, "Mow the lawn");
    }
}
