//! Integration test: drive a Progress the way a host task would.
//!
//! A simulated transfer advances a manual clock while counting bytes, with a
//! throttled change callback collecting status lines.

use std::sync::{Arc, Mutex};

use chrono::{Duration, TimeZone, Utc};
use tally_core::{
    ManualClock, NotifyOptions, Progress, ProgressError, ProgressEvent, ProgressOptions,
    ProgressUnit, TimeInterval,
};

fn start() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap()
}

#[test]
fn simulated_transfer_reports_throttled_status_lines() {
    let clock = ManualClock::new(start());
    let total: u64 = 10 * 1024 * 1024;
    let mut progress = Progress::new(
        ProgressOptions::default()
            .clock(clock.clone())
            .total(total)
            .unit(ProgressUnit::Byte),
    );

    let lines = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&lines);
    progress.on(
        ProgressEvent::Change,
        move |state| {
            let line = state.to_formatted_string(Some("${Counter}/${TotalCount} ${ElapsedTime}"));
            sink.lock().unwrap().push(line);
            Ok(())
        },
        NotifyOptions::throttled(1_000),
    );

    // 64 KiB chunks every 250ms: a 10 MiB transfer takes 40s.
    let chunk = 64 * 1024;
    for _ in 0..(total / chunk) {
        clock.advance(Duration::milliseconds(250));
        progress.advance(chunk).unwrap();
    }

    assert_eq!(progress.counter(), total);
    assert_eq!(progress.percentage_completed(), Some(100.0));
    assert_eq!(
        progress.calculate_estimated_time_enroute(),
        Some(TimeInterval::ZERO)
    );

    let lines = lines.lock().unwrap();
    // First chunk fires, then one line per elapsed second.
    assert_eq!(lines.len(), 40);
    assert_eq!(lines[0], "64.00 KiB/10.00 MiB 00:00:00");
    assert_eq!(lines[4], "1.06 MiB/10.00 MiB 00:00:04");
    assert_eq!(lines.last().unwrap(), "9.81 MiB/10.00 MiB 00:00:39");
}

#[test]
fn estimate_appears_once_total_is_known() {
    let clock = ManualClock::new(start());
    let mut progress = Progress::new(ProgressOptions::default().clock(clock.clone()));

    clock.advance(Duration::seconds(10));
    progress.set_counter(100).unwrap();
    assert!(progress.calculate_estimated_time_enroute().is_none());

    progress.set_total(400).unwrap();
    let ete = progress.calculate_estimated_time_enroute().unwrap();
    assert_eq!(ete.as_secs(), 30);
    assert_eq!(
        progress.calculate_estimated_time_of_arrival(),
        Some(start() + Duration::seconds(40))
    );
    assert_eq!(
        progress.to_formatted_string(Some("${PercentageCompleted}% ${EstimatedTimeEnroute}")),
        "25.00% 00:00:30"
    );
}

#[test]
fn long_running_estimate_carries_into_days_and_years() {
    let clock = ManualClock::new(start());
    let mut progress = Progress::new(
        ProgressOptions::default()
            .clock(clock.clone())
            .total(1_000_000),
    );
    progress.set_counter(1).unwrap();
    clock.advance(Duration::seconds(100));

    // 100s per item, 999_999 items left.
    let ete = progress.calculate_estimated_time_enroute().unwrap();
    assert_eq!(ete.as_secs(), 99_999_900);
    assert_eq!(ete.years, 3);
    assert_eq!(ete.days, 62);
    assert_eq!(ete.hours, 9);
    assert_eq!(ete.minutes, 45);
    assert_eq!(ete.seconds, 0);
}

#[test]
fn callback_error_propagates_to_mutator() {
    let mut progress = Progress::default();
    progress.on(
        ProgressEvent::Change,
        |state| {
            if state.counter() > 1 {
                anyhow::bail!("stop at {}", state.counter());
            }
            Ok(())
        },
        NotifyOptions::default(),
    );
    progress.increment_counter().unwrap();
    match progress.increment_counter() {
        Err(ProgressError::Callback(e)) => assert_eq!(e.to_string(), "stop at 2"),
        other => panic!("expected callback error, got {other:?}"),
    }
    assert_eq!(progress.counter(), 2);
}

#[test]
fn locale_grouping_in_status_line() {
    let mut progress = Progress::new(ProgressOptions::default().locale("de-DE").total(1_000));
    progress.set_counter(1_000).unwrap();
    assert_eq!(
        progress.to_formatted_string(Some("${Counter}/${TotalCount}")),
        "1.000/1.000"
    );

    let plain = Progress::with_total(1_000);
    assert_eq!(
        plain.to_formatted_string(Some("${Counter}/${TotalCount}")),
        "0/1000"
    );
}
