use crate::conf::{ArchonConfig, ConfigError, load_config, parse_config, resolve_config};
use crate::queue::QueuePolicy;
use crate::tail::StartPosition;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::tempdir;

const TEMPLATE: &str = include_str!("../../../config-templates/archon.hcl");

fn origin() -> &'static Path {
    Path::new("test.hcl")
}

#[test]
fn empty_file_yields_defaults() {
    let config = parse_config("", origin()).unwrap();

    assert_eq!(config, ArchonConfig::default());
    assert_eq!(config.tail.path, PathBuf::from("fsm_log.txt"));
    assert_eq!(config.queue_policy(), QueuePolicy::Bounded(1024));
    assert_eq!(config.cadence(), Duration::from_millis(100));
}

#[test]
fn shipped_template_is_valid() {
    let config = parse_config(TEMPLATE, origin()).unwrap();

    assert_eq!(config.tail.start, StartPosition::Beginning);
    assert_eq!(config.dashboard.stale_after_secs, Some(5));
}

#[test]
fn partial_blocks_fill_in_defaults() {
    // Arrange
    let text = r#"
        tail {
          path  = "/var/log/fsm.log"
          start = "end"
        }
        queue {
          capacity = 0
        }
    "#;

    // Act
    let config = parse_config(text, origin()).unwrap();

    // Assert
    assert_eq!(config.tail.path, PathBuf::from("/var/log/fsm.log"));
    assert_eq!(config.tail.start, StartPosition::End);
    assert_eq!(config.tail.poll_interval_ms, 10);
    assert_eq!(config.queue_policy(), QueuePolicy::Unbounded);
    assert_eq!(config.dispatch.cadence_ms, 100);
}

#[test]
fn tail_settings_reflect_config() {
    let text = r#"
        tail {
          poll_interval_ms = 25
          push_grace_ms    = 0
        }
    "#;

    let settings = parse_config(text, origin()).unwrap().tail_settings();

    assert_eq!(settings.poll_interval, Duration::from_millis(25));
    assert_eq!(settings.push_grace, Duration::ZERO);
}

#[test]
fn unknown_fields_are_rejected() {
    let result = parse_config("tail {\n  pth = \"x\"\n}\n", origin());

    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
fn every_out_of_range_value_is_reported() {
    // Arrange
    let text = r#"
        tail {
          poll_interval_ms = 0
        }
        dispatch {
          cadence_ms = 60000
        }
        dashboard {
          stale_after_secs = 0
        }
    "#;

    // Act
    let err = parse_config(text, origin()).unwrap_err();

    // Assert
    let ConfigError::Validation { issues } = &err else {
        panic!("expected validation error, got {err}");
    };
    let fields: Vec<_> = issues.iter().map(|i| i.field).collect();
    assert_eq!(
        fields,
        vec![
            "tail.poll_interval_ms",
            "dispatch.cadence_ms",
            "dashboard.stale_after_secs"
        ]
    );
    assert!(err.to_string().contains("  - tail.poll_interval_ms: 0 is outside 1..=1000"));
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = tempdir().unwrap();

    let result = load_config(&dir.path().join("nope.hcl"));

    assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
}

#[test]
fn explicit_file_is_loaded() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("archon.hcl");
    fs::write(&path, "dispatch {\n  cadence_ms = 250\n}\n").unwrap();

    let config = resolve_config(Some(&path)).unwrap();

    assert_eq!(config.cadence(), Duration::from_millis(250));
}

#[test]
fn dashboard_options_follow_config() {
    let text = r#"
        dashboard {
          color            = false
          stale_after_secs = 3
        }
    "#;

    let options = parse_config(text, origin()).unwrap().dashboard_options();

    assert!(!options.colored);
    assert_eq!(options.stale_after, Some(Duration::from_secs(3)));
}
