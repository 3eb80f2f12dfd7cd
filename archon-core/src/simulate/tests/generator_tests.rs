use crate::parse::parse_line;
use crate::record::{FsmState, Record, RejectReason};
use crate::shutdown::ShutdownHandle;
use crate::simulate::{SimulationOptions, TRIGGERS, TelemetryGenerator, corrupt, run_simulation};
use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn generated_lines_parse_back_to_their_records() {
    let mut generator = TelemetryGenerator::with_rng(StdRng::seed_from_u64(7), 0.0);

    for expected_cycle in 1..=200 {
        let record = generator.next_record();
        assert_eq!(record.cycle, expected_cycle);
        assert_ne!(record.state, FsmState::Unknown);
        assert!(TRIGGERS.contains(&record.trigger.as_str()));
        assert_eq!(parse_line(&record.to_string()).unwrap(), record);
    }
}

#[test]
fn corrupt_produces_the_requested_rejection() {
    let record = Record::new(12, FsmState::Flush, 201, "Entropy Logic");

    for reason in RejectReason::ALL {
        let line = corrupt(&record, reason);
        assert_eq!(parse_line(&line).unwrap_err().reason, reason, "line: {line}");
    }
}

#[test]
fn full_malformed_ratio_never_yields_a_record() {
    let mut generator = TelemetryGenerator::with_rng(StdRng::seed_from_u64(1), 1.0);

    for _ in 0..50 {
        assert!(parse_line(&generator.next_line()).is_err());
    }
}

#[test]
fn out_of_range_ratio_is_clamped() {
    let mut generator = TelemetryGenerator::with_rng(StdRng::seed_from_u64(3), -2.0);

    for _ in 0..50 {
        assert!(parse_line(&generator.next_line()).is_ok());
    }
}

#[test]
fn simulation_writes_requested_count() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("fsm_log.txt");
    fs::write(&path, "stale content\n").unwrap();
    let options = SimulationOptions {
        path: path.clone(),
        count: Some(25),
        delay: Duration::ZERO,
        malformed_ratio: 0.0,
        echo: false,
    };

    // Act
    let written = run_simulation(&options, &ShutdownHandle::new()).unwrap();

    // Assert
    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(written, 25);
    assert_eq!(text.lines().count(), 25);
    assert!(text.ends_with('\n'));
    assert!(!text.contains("stale content"));
    assert!(text.lines().all(|l| parse_line(l).is_ok()));
}

#[test]
fn simulation_stops_when_shutdown_is_triggered() {
    let dir = tempdir().unwrap();
    let shutdown = ShutdownHandle::new();
    shutdown.trigger();
    let options = SimulationOptions {
        path: dir.path().join("fsm_log.txt"),
        count: None,
        delay: Duration::ZERO,
        malformed_ratio: 0.0,
        echo: false,
    };

    let written = run_simulation(&options, &shutdown).unwrap();

    assert_eq!(written, 0);
}
