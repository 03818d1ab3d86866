//! Tick scheduler state machine (`Idle` <-> `Active`).

use crate::store::timer_store::TimerStore;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

const NANOS_PER_MILLI: u32 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerError {
    /// A zero period would spin; rejected at construction.
    ZeroInterval,
    /// Periods must be whole milliseconds so each tick adds exactly one
    /// period to `elapsed`.
    SubMillisecondInterval,
    /// `start()` was called outside a tokio runtime.
    NoRuntime,
}

impl Display for SchedulerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroInterval => write!(f, "tick interval must be greater than zero"),
            Self::SubMillisecondInterval => {
                write!(f, "tick interval must be a whole number of milliseconds")
            }
            Self::NoRuntime => write!(f, "no tokio runtime available to host the tick task"),
        }
    }
}

impl Error for SchedulerError {}

#[derive(Debug)]
enum SchedulerState {
    Idle,
    Active(JoinHandle<()>),
}

/// Recurring trigger that advances running timers.
///
/// Holds only a store handle. Pausing individual timers is expressed through
/// their `is_running` flag, never by stopping the scheduler.
#[derive(Debug)]
pub struct TickScheduler {
    store: TimerStore,
    interval: Duration,
    state: SchedulerState,
}

impl TickScheduler {
    /// Creates an idle scheduler.
    ///
    /// # Errors
    /// - Returns `SchedulerError::ZeroInterval` for a zero `interval`.
    /// - Returns `SchedulerError::SubMillisecondInterval` when `interval` has a
    ///   sub-millisecond remainder.
    pub fn new(store: TimerStore, interval: Duration) -> Result<Self, SchedulerError> {
        if interval.is_zero() {
            return Err(SchedulerError::ZeroInterval);
        }
        if interval.subsec_nanos() % NANOS_PER_MILLI != 0 {
            return Err(SchedulerError::SubMillisecondInterval);
        }
        Ok(Self {
            store,
            interval,
            state: SchedulerState::Idle,
        })
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, SchedulerState::Active(_))
    }

    /// Transitions `Idle -> Active` on the ambient tokio runtime.
    ///
    /// # Errors
    /// - Returns `SchedulerError::NoRuntime` when called outside a runtime.
    pub fn start(&mut self) -> Result<(), SchedulerError> {
        let handle = Handle::try_current().map_err(|_| SchedulerError::NoRuntime)?;
        self.start_on(&handle);
        Ok(())
    }

    /// Transitions `Idle -> Active` on an explicit runtime.
    ///
    /// Already-active schedulers are left running.
    pub fn start_on(&mut self, runtime: &Handle) {
        if self.is_active() {
            warn!("event=scheduler_start module=scheduler status=skipped reason=already_active");
            return;
        }

        let store = self.store.clone();
        let period = self.interval;
        let interval_ms = u64::try_from(period.as_millis()).unwrap_or(u64::MAX);
        let task = runtime.spawn(async move {
            // Fixed-rate: deadlines are measured from start, not from the
            // end of the previous tick.
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);
            loop {
                ticker.tick().await;
                store.tick(interval_ms);
            }
        });

        self.state = SchedulerState::Active(task);
        info!("event=scheduler_start module=scheduler status=ok interval_ms={interval_ms}");
    }

    /// Transitions `Active -> Idle`, cancelling the recurring task.
    pub fn stop(&mut self) {
        if let SchedulerState::Active(task) =
            std::mem::replace(&mut self.state, SchedulerState::Idle)
        {
            task.abort();
            info!("event=scheduler_stop module=scheduler status=ok");
        }
    }
}

impl Drop for TickScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::{SchedulerError, TickScheduler};
    use crate::store::timer_store::TimerStore;
    use std::time::Duration;

    #[test]
    fn zero_interval_is_rejected() {
        let err = TickScheduler::new(TimerStore::new(), Duration::ZERO).unwrap_err();
        assert_eq!(err, SchedulerError::ZeroInterval);
    }

    #[test]
    fn sub_millisecond_intervals_are_rejected() {
        for interval in [
            Duration::from_micros(500),
            Duration::from_micros(1_500),
            Duration::from_nanos(1_000_000_001),
        ] {
            let err = TickScheduler::new(TimerStore::new(), interval).unwrap_err();
            assert_eq!(err, SchedulerError::SubMillisecondInterval);
        }
        assert!(TickScheduler::new(TimerStore::new(), Duration::from_millis(1_500)).is_ok());
    }

    #[test]
    fn start_outside_runtime_fails_and_stays_idle() {
        let mut scheduler = TickScheduler::new(TimerStore::new(), Duration::from_secs(1)).unwrap();
        assert_eq!(scheduler.start(), Err(SchedulerError::NoRuntime));
        assert!(!scheduler.is_active());
    }

    #[test]
    fn stop_while_idle_is_a_no_op() {
        let mut scheduler = TickScheduler::new(TimerStore::new(), Duration::from_secs(1)).unwrap();
        scheduler.stop();
        assert!(!scheduler.is_active());
    }
}
