//! Integration tests for the real-time scheduler lifecycle.

mod common;

use std::thread;
use std::time::{Duration, Instant};

use bems_sim::sim::engine::Engine;
use bems_sim::sim::scheduler::{Scheduler, SchedulerError};

fn wait_for_reports(sink: &common::CollectingSink, at_least: usize) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while sink.count() < at_least && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn live_run_publishes_sequential_ticks() {
    let engine = Engine::new(common::one_room_building(), &common::settings_at(9, 0, 42))
        .expect("valid topology");
    let mut scheduler = Scheduler::new(engine, Duration::from_millis(10));
    let sink = common::CollectingSink::new();

    scheduler.start(sink.clone()).expect("start succeeds");
    wait_for_reports(&sink, 3);
    scheduler.stop();

    let reports = sink.reports();
    assert!(reports.len() >= 3, "got {} reports", reports.len());

    // Virtual time advances one minute per tick, strictly ordered.
    for pair in reports.windows(2) {
        assert!(pair[0].timestamp < pair[1].timestamp);
    }
    assert_eq!(
        reports[0].timestamp.format("%H:%M").to_string(),
        "09:01".to_string()
    );

    // Every published snapshot satisfies the consumption invariant.
    for report in &reports {
        let recomputed: f64 = report.equipment.iter().map(|e| e.consumption_w).sum();
        assert!((report.total_consumption_w - recomputed).abs() < 1e-9);
    }
}

#[test]
fn start_while_running_is_rejected() {
    let engine = Engine::new(common::one_room_building(), &common::settings_at(9, 0, 1))
        .expect("valid topology");
    let mut scheduler = Scheduler::new(engine, Duration::from_secs(60));

    scheduler.start(common::CollectingSink::new()).expect("first start");
    assert!(scheduler.is_running());

    let second = scheduler.start(common::CollectingSink::new());
    assert!(matches!(second, Err(SchedulerError::AlreadyRunning)));
    // The rejected start must not have disturbed the active run.
    assert!(scheduler.is_running());

    scheduler.stop();
    assert!(!scheduler.is_running());
}

#[test]
fn stop_completes_the_tick_and_is_idempotent() {
    let engine = Engine::new(common::one_room_building(), &common::settings_at(9, 0, 2))
        .expect("valid topology");
    let mut scheduler = Scheduler::new(engine, Duration::from_millis(10));
    let sink = common::CollectingSink::new();

    scheduler.start(sink.clone()).expect("start succeeds");
    wait_for_reports(&sink, 1);
    scheduler.stop();
    let after_stop = sink.count();
    assert!(after_stop >= 1);

    // Stopping again changes nothing.
    scheduler.stop();
    assert_eq!(sink.count(), after_stop);

    // The recovered engine's clock matches the number of published ticks.
    let engine = scheduler.engine().expect("engine recovered after stop");
    let expected_minute = after_stop as i64;
    let elapsed = engine.now() - common::settings_at(9, 0, 2).start_time;
    assert_eq!(elapsed.num_minutes(), expected_minute);
}

#[test]
fn restart_continues_from_the_recovered_state() {
    let engine = Engine::new(common::one_room_building(), &common::settings_at(9, 0, 3))
        .expect("valid topology");
    let mut scheduler = Scheduler::new(engine, Duration::from_millis(10));
    let sink = common::CollectingSink::new();

    scheduler.start(sink.clone()).expect("first start");
    wait_for_reports(&sink, 2);
    scheduler.stop();
    let first_run = sink.count();

    scheduler.start(sink.clone()).expect("second start");
    wait_for_reports(&sink, first_run + 1);
    scheduler.stop();

    let reports = sink.reports();
    assert!(reports.len() > first_run);
    // No clock reset between runs: timestamps keep increasing.
    for pair in reports.windows(2) {
        assert!(pair[0].timestamp < pair[1].timestamp);
    }
}
