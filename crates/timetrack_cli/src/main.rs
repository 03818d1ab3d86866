//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `timetrack_core` linkage.
//! - Run a short seeded session and print each published snapshot.

use std::time::Duration;
use timetrack_core::{sample_timers, Snapshot, TimerService, TrackerConfig};

const DEMO_TICK_INTERVAL_MS: u64 = 200;
const DEMO_TICKS: usize = 3;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("timetrack_core ping={}", timetrack_core::ping());
    println!("timetrack_core version={}", timetrack_core::core_version());

    let config = TrackerConfig {
        tick_interval_ms: DEMO_TICK_INTERVAL_MS,
    };
    let mut service =
        TimerService::with_snapshot(&config, Snapshot::from_timers(sample_timers())?)?;
    let mut snapshots = service.subscribe();
    print_snapshot("seed", &service.snapshot());

    service.start()?;
    for tick in 1..=DEMO_TICKS {
        snapshots.changed().await?;
        let snapshot = snapshots.borrow_and_update().clone();
        print_snapshot(&format!("tick {tick}"), &snapshot);
    }
    service.stop();

    tokio::time::sleep(Duration::from_millis(DEMO_TICK_INTERVAL_MS * 2)).await;
    print_snapshot("after stop", &service.snapshot());
    Ok(())
}

fn print_snapshot(label: &str, snapshot: &Snapshot) {
    println!("[{label}]");
    for timer in snapshot {
        let state = if timer.is_running { "running" } else { "stopped" };
        println!(
            "  {} {:<14} {:<16} {}",
            timer.elapsed_display(),
            timer.title,
            timer.project,
            state
        );
    }
}
