//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level timer functions to Dart via FRB.
//! - Own the single tracker session the host starts and stops.
//! - `SESSION` is the only process-wide state; core stores and schedulers are
//!   instance-scoped and know nothing about it.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - The session's scheduler is stopped before its runtime shuts down.
//! - Unknown timer IDs are no-ops; malformed IDs are reported as failures.

use std::sync::{Mutex, MutexGuard};
use timetrack_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    sample_timers, Snapshot, Timer, TimerAttributes, TimerId, TimerService, TrackerConfig,
};
use tokio::runtime::{Builder, Runtime};
use uuid::Uuid;

const TICK_THREAD_NAME: &str = "timetrack-tick";

static SESSION: Mutex<Option<TrackerSession>> = Mutex::new(None);

// Field order matters: the service (and its scheduler) drops before the
// runtime hosting the tick task.
struct TrackerSession {
    service: TimerService,
    _runtime: Runtime,
}

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Display row for one timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerItem {
    /// Stable timer ID in string form.
    pub timer_id: String,
    pub title: String,
    pub project: String,
    /// Accumulated milliseconds.
    pub elapsed_ms: u64,
    /// Accumulated time as `HH:MM:SS`.
    pub elapsed_display: String,
    pub is_running: bool,
}

/// Snapshot envelope for list rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerListResponse {
    /// Timers in display order (newest first).
    pub items: Vec<TimerItem>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Affected timer ID, when the action targets or creates one.
    pub timer_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl TrackerActionResponse {
    fn success(message: impl Into<String>, timer_id: Option<TimerId>) -> Self {
        Self {
            ok: true,
            timer_id: timer_id.map(|id| id.to_string()),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            timer_id: None,
            message: message.into(),
        }
    }
}

/// Starts the tracker session and its tick scheduler.
///
/// Input semantics:
/// - `tick_interval_ms`: `None` uses the default 1000 ms cadence.
/// - `seed_samples`: start with the built-in demo timers.
///
/// # FFI contract
/// - Call once from the host's init path; a second call fails.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_start(tick_interval_ms: Option<u64>, seed_samples: bool) -> TrackerActionResponse {
    let mut session = match lock_session() {
        Ok(session) => session,
        Err(message) => return TrackerActionResponse::failure(message),
    };
    if session.is_some() {
        return TrackerActionResponse::failure("tracker_start failed: tracker already started");
    }

    match start_session(tick_interval_ms, seed_samples) {
        Ok(started) => {
            *session = Some(started);
            TrackerActionResponse::success("Tracker started.", None)
        }
        Err(err) => TrackerActionResponse::failure(format!("tracker_start failed: {err}")),
    }
}

/// Stops the tracker session and discards all timers.
///
/// # FFI contract
/// - Call once from the host's teardown path.
/// - Stopping a tracker that is not running succeeds as a no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_stop() -> TrackerActionResponse {
    let mut session = match lock_session() {
        Ok(session) => session,
        Err(message) => return TrackerActionResponse::failure(message),
    };
    match session.take() {
        Some(mut stopped) => {
            stopped.service.stop();
            drop(stopped);
            TrackerActionResponse::success("Tracker stopped.", None)
        }
        None => TrackerActionResponse::success("Tracker was not running.", None),
    }
}

/// Handles a create-form submit.
#[flutter_rust_bridge::frb(sync)]
pub fn timer_create(title: String, project: String) -> TrackerActionResponse {
    match with_service(|service| service.on_create_submit(title, project)) {
        Ok(id) => TrackerActionResponse::success("Timer created.", Some(id)),
        Err(err) => TrackerActionResponse::failure(format!("timer_create failed: {err}")),
    }
}

/// Handles an edit-form submit.
#[flutter_rust_bridge::frb(sync)]
pub fn timer_edit(timer_id: String, title: String, project: String) -> TrackerActionResponse {
    let result = parse_timer_id(&timer_id).and_then(|id| {
        with_service(|service| {
            service.on_edit_submit(&TimerAttributes { id, title, project });
            id
        })
    });
    match result {
        Ok(id) => TrackerActionResponse::success("Timer updated.", Some(id)),
        Err(err) => TrackerActionResponse::failure(format!("timer_edit failed: {err}")),
    }
}

/// Handles a remove press.
#[flutter_rust_bridge::frb(sync)]
pub fn timer_remove(timer_id: String) -> TrackerActionResponse {
    let result = parse_timer_id(&timer_id).and_then(|id| {
        with_service(|service| {
            service.on_remove(id);
            id
        })
    });
    match result {
        Ok(id) => TrackerActionResponse::success("Timer removed.", Some(id)),
        Err(err) => TrackerActionResponse::failure(format!("timer_remove failed: {err}")),
    }
}

/// Handles a start or stop press.
#[flutter_rust_bridge::frb(sync)]
pub fn timer_toggle(timer_id: String) -> TrackerActionResponse {
    let result = parse_timer_id(&timer_id).and_then(|id| {
        with_service(|service| {
            service.on_start_stop_toggle(id);
            id
        })
    });
    match result {
        Ok(id) => TrackerActionResponse::success("Timer toggled.", Some(id)),
        Err(err) => TrackerActionResponse::failure(format!("timer_toggle failed: {err}")),
    }
}

/// Returns the current snapshot for rendering.
///
/// # FFI contract
/// - Sync call, read-only.
/// - Returns an empty list with a diagnostic message when not started.
#[flutter_rust_bridge::frb(sync)]
pub fn timer_list() -> TimerListResponse {
    match with_service(TimerService::snapshot) {
        Ok(snapshot) => {
            let items = to_timer_items(&snapshot);
            let message = if items.is_empty() {
                "No timers.".to_string()
            } else {
                format!("{} timer(s).", items.len())
            };
            TimerListResponse { items, message }
        }
        Err(err) => TimerListResponse {
            items: Vec::new(),
            message: format!("timer_list failed: {err}"),
        },
    }
}

fn start_session(
    tick_interval_ms: Option<u64>,
    seed_samples: bool,
) -> Result<TrackerSession, String> {
    let config = match tick_interval_ms {
        Some(tick_interval_ms) => TrackerConfig { tick_interval_ms },
        None => TrackerConfig::default(),
    };
    let initial = if seed_samples {
        Snapshot::from_timers(sample_timers()).map_err(|err| err.to_string())?
    } else {
        Snapshot::default()
    };
    let mut service =
        TimerService::with_snapshot(&config, initial).map_err(|err| err.to_string())?;

    let runtime = Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name(TICK_THREAD_NAME)
        .enable_time()
        .build()
        .map_err(|err| format!("tick runtime init failed: {err}"))?;
    service.start_on(runtime.handle());

    Ok(TrackerSession {
        service,
        _runtime: runtime,
    })
}

fn lock_session() -> Result<MutexGuard<'static, Option<TrackerSession>>, String> {
    SESSION
        .lock()
        .map_err(|_| "tracker session lock poisoned".to_string())
}

fn with_service<T>(f: impl FnOnce(&TimerService) -> T) -> Result<T, String> {
    let session = lock_session()?;
    let session = session
        .as_ref()
        .ok_or_else(|| "tracker is not started".to_string())?;
    Ok(f(&session.service))
}

fn parse_timer_id(raw: &str) -> Result<TimerId, String> {
    Uuid::parse_str(raw.trim()).map_err(|err| format!("invalid timer id `{raw}`: {err}"))
}

fn to_timer_items(snapshot: &Snapshot) -> Vec<TimerItem> {
    snapshot.iter().map(to_timer_item).collect()
}

fn to_timer_item(timer: &Timer) -> TimerItem {
    TimerItem {
        timer_id: timer.id.to_string(),
        title: timer.title.clone(),
        project: timer.project.clone(),
        elapsed_ms: timer.elapsed,
        elapsed_display: timer.elapsed_display(),
        is_running: timer.is_running,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, parse_timer_id, ping, timer_create, timer_edit, timer_list,
        timer_remove, timer_toggle, tracker_start, tracker_stop,
    };

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "/tmp/timetrack-logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn parse_timer_id_rejects_garbage() {
        let error = parse_timer_id("not-a-uuid").unwrap_err();
        assert!(error.contains("invalid timer id"));
    }

    // Single test drives the process-wide session to avoid cross-test races.
    #[test]
    fn tracker_session_lifecycle() {
        let before_start = timer_create("early".to_string(), String::new());
        assert!(!before_start.ok);
        assert!(before_start.message.contains("not started"));

        let started = tracker_start(Some(60_000), true);
        assert!(started.ok, "{}", started.message);
        assert!(!tracker_start(None, false).ok);
        assert_eq!(timer_list().items.len(), 3);

        let created = timer_create("Write report".to_string(), "Work".to_string());
        assert!(created.ok, "{}", created.message);
        let created_id = created.timer_id.expect("create should return timer_id");

        let list = timer_list();
        assert_eq!(list.items.len(), 4);
        assert_eq!(list.items[0].timer_id, created_id);
        assert_eq!(list.items[0].elapsed_display, "00:00:00");
        assert!(!list.items[0].is_running);

        let edited = timer_edit(created_id.clone(), "Write summary".to_string(), String::new());
        assert!(edited.ok, "{}", edited.message);
        let toggled = timer_toggle(created_id.clone());
        assert!(toggled.ok, "{}", toggled.message);

        let list = timer_list();
        assert_eq!(list.items[0].title, "Write summary");
        assert_eq!(list.items[0].project, "");
        assert!(list.items[0].is_running);

        assert!(!timer_toggle("bogus".to_string()).ok);
        let removed = timer_remove(created_id);
        assert!(removed.ok, "{}", removed.message);
        assert_eq!(timer_list().items.len(), 3);

        assert!(tracker_stop().ok);
        assert!(tracker_stop().ok);
        assert!(timer_list().items.is_empty());
    }
}
