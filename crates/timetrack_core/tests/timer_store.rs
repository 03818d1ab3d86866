use timetrack_core::{Snapshot, Timer, TimerStore};

fn timer(title: &str, elapsed: u64, is_running: bool) -> Timer {
    let mut timer = Timer::new(title, "proj");
    timer.elapsed = elapsed;
    timer.is_running = is_running;
    timer
}

fn seeded(timers: Vec<Timer>) -> TimerStore {
    TimerStore::with_snapshot(Snapshot::from_timers(timers).unwrap())
}

#[test]
fn create_on_empty_collection_yields_default_timer() {
    let store = TimerStore::new();

    let snapshot = store.create("Read", "Books");

    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].title, "Read");
    assert_eq!(snapshot[0].project, "Books");
    assert_eq!(snapshot[0].elapsed, 0);
    assert!(!snapshot[0].is_running);
}

#[test]
fn create_prepends_and_keeps_existing_order() {
    let store = TimerStore::new();
    let first = store.create("first", "")[0].clone();
    let second = store.create("second", "")[0].clone();

    let snapshot = store.create("third", "");

    assert_eq!(snapshot.len(), 3);
    assert_eq!(snapshot[0].title, "third");
    assert_eq!(snapshot[1], second);
    assert_eq!(snapshot[2], first);
}

#[test]
fn tick_advances_running_and_freezes_stopped() {
    let running = timer("running", 5_000, true);
    let stopped = timer("stopped", 5_000, false);
    let store = seeded(vec![running.clone(), stopped.clone()]);

    let snapshot = store.tick(1_000);

    assert_eq!(snapshot[0].elapsed, 6_000);
    assert_eq!(
        snapshot[0],
        Timer {
            elapsed: 6_000,
            ..running
        }
    );
    assert_eq!(snapshot[1], stopped);
}

#[test]
fn toggle_changes_only_run_state_of_target() {
    let a = timer("a", 1_000, true);
    let b = timer("b", 2_000, false);
    let store = seeded(vec![a.clone(), b.clone()]);

    let snapshot = store.toggle_running(a.id);

    assert_eq!(
        snapshot.to_vec(),
        vec![
            Timer {
                is_running: false,
                ..a.clone()
            },
            b.clone()
        ]
    );

    let after_tick = store.tick(1_000);
    assert_eq!(after_tick[0].elapsed, 1_000);
    assert_eq!(after_tick[1].elapsed, 2_000);
}

#[test]
fn toggle_twice_restores_original_record() {
    let a = timer("a", 700, false);
    let store = seeded(vec![a.clone()]);

    store.toggle_running(a.id);
    let snapshot = store.toggle_running(a.id);

    assert_eq!(snapshot[0], a);
}

#[test]
fn remove_preserves_order_of_survivors() {
    let a = timer("a", 0, false);
    let b = timer("b", 0, true);
    let c = timer("c", 0, false);
    let store = seeded(vec![a.clone(), b.clone(), c.clone()]);

    let snapshot = store.remove(b.id);

    assert_eq!(snapshot.to_vec(), vec![a, c]);
    assert!(!snapshot.contains(b.id));
}

#[test]
fn removed_timer_stops_accumulating() {
    let a = timer("a", 0, true);
    let store = seeded(vec![a.clone()]);

    store.remove(a.id);
    let snapshot = store.tick(1_000);

    assert!(snapshot.is_empty());
}

#[test]
fn update_attributes_keeps_accounting_and_position() {
    let first = timer("first", 0, false);
    let target = timer("x", 4_200, true);
    let store = seeded(vec![first.clone(), target.clone()]);

    let snapshot = store.update_attributes(target.id, "y", "proj2");

    assert_eq!(snapshot[0], first);
    assert_eq!(snapshot[1].id, target.id);
    assert_eq!(snapshot[1].title, "y");
    assert_eq!(snapshot[1].project, "proj2");
    assert_eq!(snapshot[1].elapsed, 4_200);
    assert!(snapshot[1].is_running);
}

#[test]
fn unknown_ids_leave_collection_unchanged() {
    let store = seeded(vec![timer("a", 10, true), timer("b", 20, false)]);
    let before = store.snapshot();
    let ghost = Timer::new("ghost", "").id;

    assert_eq!(store.remove(ghost), before);
    assert_eq!(store.toggle_running(ghost), before);
    assert_eq!(store.update_attributes(ghost, "t", "p"), before);
    assert_eq!(store.snapshot(), before);
}

#[test]
fn held_snapshot_is_unaffected_by_later_operations() {
    let store = seeded(vec![timer("a", 0, true)]);
    let held = store.snapshot();

    store.tick(1_000);
    store.create("b", "");

    assert_eq!(held.len(), 1);
    assert_eq!(held[0].elapsed, 0);
}

#[test]
fn subscribers_receive_snapshots_by_value() {
    let store = TimerStore::new();
    let receiver = store.subscribe();

    let published = store.create("Read", "Books");

    assert_eq!(*receiver.borrow(), published);
}
