use super::error::{ConfigError, ValidationIssue};
use crate::dispatch::DEFAULT_CADENCE;
use crate::present::DashboardOptions;
use crate::queue::QueuePolicy;
use crate::tail::{StartPosition, TailSettings};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::time::Duration;

const POLL_INTERVAL_RANGE_MS: RangeInclusive<u64> = 1..=1_000;
const PUSH_GRACE_RANGE_MS: RangeInclusive<u64> = 0..=10_000;
const CADENCE_RANGE_MS: RangeInclusive<u64> = 10..=5_000;
const READ_CHUNK_RANGE: RangeInclusive<usize> = 1_024..=16 * 1024 * 1024;

/// Top-level `archon.hcl`. Every block and field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArchonConfig {
    pub tail: TailConfig,
    pub queue: QueueConfig,
    pub dispatch: DispatchConfig,
    pub dashboard: DashboardConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct TailConfig {
    /// The telemetry log to follow.
    pub path: PathBuf,

    pub start: StartPosition,

    /// Empty the file before tailing starts.
    pub fresh: bool,

    pub poll_interval_ms: u64,
    pub push_grace_ms: u64,
    pub read_chunk_bytes: usize,
}

impl Default for TailConfig {
    fn default() -> Self {
        let settings = TailSettings::default();
        Self {
            path: PathBuf::from("fsm_log.txt"),
            start: settings.start,
            fresh: false,
            poll_interval_ms: settings.poll_interval.as_millis() as u64,
            push_grace_ms: settings.push_grace.as_millis() as u64,
            read_chunk_bytes: settings.read_chunk,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueueConfig {
    /// Zero means unbounded.
    pub capacity: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self { capacity: 1024 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DispatchConfig {
    pub cadence_ms: u64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            cadence_ms: DEFAULT_CADENCE.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub color: bool,

    /// Unset disables the stale banner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stale_after_secs: Option<u64>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            color: true,
            stale_after_secs: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is not set.
    pub level: String,

    /// Where logs go while the dashboard owns the terminal.
    pub dir: PathBuf,
    pub file_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: PathBuf::from("logs"),
            file_name: "archon.log".to_string(),
        }
    }
}

impl ArchonConfig {
    pub fn tail_settings(&self) -> TailSettings {
        TailSettings {
            start: self.tail.start,
            poll_interval: Duration::from_millis(self.tail.poll_interval_ms),
            push_grace: Duration::from_millis(self.tail.push_grace_ms),
            read_chunk: self.tail.read_chunk_bytes,
        }
    }

    pub fn queue_policy(&self) -> QueuePolicy {
        QueuePolicy::from_capacity(self.queue.capacity)
    }

    pub fn cadence(&self) -> Duration {
        Duration::from_millis(self.dispatch.cadence_ms)
    }

    pub fn dashboard_options(&self) -> DashboardOptions {
        DashboardOptions {
            colored: self.dashboard.color,
            stale_after: self.dashboard.stale_after_secs.map(Duration::from_secs),
        }
    }

    /// Check every bound and report all violations at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut issues = Vec::new();

        if self.tail.path.as_os_str().is_empty() {
            issues.push(ValidationIssue {
                field: "tail.path",
                message: "must not be empty".to_string(),
            });
        }

        check_range(
            &mut issues,
            "tail.poll_interval_ms",
            self.tail.poll_interval_ms,
            POLL_INTERVAL_RANGE_MS,
        );
        check_range(
            &mut issues,
            "tail.push_grace_ms",
            self.tail.push_grace_ms,
            PUSH_GRACE_RANGE_MS,
        );
        check_range(
            &mut issues,
            "tail.read_chunk_bytes",
            self.tail.read_chunk_bytes,
            READ_CHUNK_RANGE,
        );
        check_range(
            &mut issues,
            "dispatch.cadence_ms",
            self.dispatch.cadence_ms,
            CADENCE_RANGE_MS,
        );

        if self.dashboard.stale_after_secs == Some(0) {
            issues.push(ValidationIssue {
                field: "dashboard.stale_after_secs",
                message: "must be at least 1 (omit to disable)".to_string(),
            });
        }

        if self.logging.file_name.is_empty() {
            issues.push(ValidationIssue {
                field: "logging.file_name",
                message: "must not be empty".to_string(),
            });
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation { issues })
        }
    }
}

fn check_range<T>(
    issues: &mut Vec<ValidationIssue>,
    field: &'static str,
    value: T,
    range: RangeInclusive<T>,
) where
    T: PartialOrd + std::fmt::Display,
{
    if !range.contains(&value) {
        issues.push(ValidationIssue {
            field,
            message: format!(
                "{value} is outside {}..={}",
                range.start(),
                range.end()
            ),
        });
    }
}
