use crate::cli::watch::WatchArgs;
use crate::conf::ArchonConfig;
use crate::queue::QueuePolicy;
use crate::tail::StartPosition;
use pretty_assertions::assert_eq;
use std::path::PathBuf;

#[test]
fn no_flags_leave_config_untouched() {
    let mut cfg = ArchonConfig::default();

    WatchArgs::default().apply(&mut cfg);

    assert_eq!(cfg, ArchonConfig::default());
}

#[test]
fn flags_override_config() {
    // Arrange
    let mut cfg = ArchonConfig::default();
    let args = WatchArgs {
        file: Some(PathBuf::from("/tmp/other.log")),
        from_end: true,
        fresh: true,
        queue_capacity: Some(0),
        no_color: true,
        ..WatchArgs::default()
    };

    // Act
    args.apply(&mut cfg);

    // Assert
    assert_eq!(cfg.tail.path, PathBuf::from("/tmp/other.log"));
    assert_eq!(cfg.tail.start, StartPosition::End);
    assert!(cfg.tail.fresh);
    assert_eq!(cfg.queue_policy(), QueuePolicy::Unbounded);
    assert!(!cfg.dashboard.color);
}
