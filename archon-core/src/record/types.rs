use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// One decoded telemetry line.
///
/// `entropy` is a `u8`, so a `Record` can never hold a score outside 0..=255.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub cycle: u64,
    pub state: FsmState,
    pub entropy: u8,
    pub trigger: String,
}

impl Record {
    /// `trigger` must already be in parsed form: non-empty, trimmed, and
    /// free of the `" | "` delimiter and line feeds. Only such labels
    /// survive a format and re-parse unchanged.
    pub fn new(cycle: u64, state: FsmState, entropy: u8, trigger: impl Into<String>) -> Self {
        let trigger = trigger.into();
        debug_assert!(
            is_trigger_label(&trigger),
            "trigger label {trigger:?} cannot appear on a wire line"
        );
        Self {
            cycle,
            state,
            entropy,
            trigger,
        }
    }
}

/// Whether `label` has the shape the parser produces for a trigger.
pub fn is_trigger_label(label: &str) -> bool {
    !label.is_empty() && label.trim() == label && !label.contains(" | ") && !label.contains('\n')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FsmState {
    Ok,
    Stall,
    Flush,
    Lock,
    Unknown,
}

impl FsmState {
    pub const REPORTED: [FsmState; 4] = [Self::Ok, Self::Stall, Self::Flush, Self::Lock];

    /// Case-sensitive match against the wire spelling. Anything else is
    /// advisory noise and becomes `Unknown`.
    pub fn from_wire(s: &str) -> Self {
        match s {
            "OK" => Self::Ok,
            "STALL" => Self::Stall,
            "FLUSH" => Self::Flush,
            "LOCK" => Self::Lock,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Stall => "STALL",
            Self::Flush => "FLUSH",
            Self::Lock => "LOCK",
            Self::Unknown => "UNKNOWN",
        }
    }

    pub fn severity(&self) -> StateSeverity {
        match self {
            Self::Ok => StateSeverity::Nominal,
            Self::Stall => StateSeverity::Warning,
            Self::Flush | Self::Lock => StateSeverity::Critical,
            Self::Unknown => StateSeverity::Indeterminate,
        }
    }
}

impl fmt::Display for FsmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How alarming an FSM state is, independent of how it gets drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StateSeverity {
    Nominal,
    Warning,
    Critical,
    Indeterminate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectReason {
    WrongSegmentCount,
    MissingStateMarker,
    NonIntegerCycle,
    EntropyOutOfRange,
    NonIntegerEntropy,
    EmptyTrigger,
}

impl RejectReason {
    pub const ALL: [RejectReason; 6] = [
        Self::WrongSegmentCount,
        Self::MissingStateMarker,
        Self::NonIntegerCycle,
        Self::EntropyOutOfRange,
        Self::NonIntegerEntropy,
        Self::EmptyTrigger,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::WrongSegmentCount => "WRONG_SEGMENT_COUNT",
            Self::MissingStateMarker => "MISSING_STATE_MARKER",
            Self::NonIntegerCycle => "NON_INTEGER_CYCLE",
            Self::EntropyOutOfRange => "ENTROPY_OUT_OF_RANGE",
            Self::NonIntegerEntropy => "NON_INTEGER_ENTROPY",
            Self::EmptyTrigger => "EMPTY_TRIGGER",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A line the parser refused, kept verbatim for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("rejected log line ({reason}): {line}")]
pub struct RejectedLine {
    pub line: String,
    pub reason: RejectReason,
}

impl RejectedLine {
    pub fn new(line: impl Into<String>, reason: RejectReason) -> Self {
        Self {
            line: line.into(),
            reason,
        }
    }
}

/// Item carried from the tailer to the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ingested {
    Record(Record),
    Rejected(RejectedLine),
}

impl From<Result<Record, RejectedLine>> for Ingested {
    fn from(value: Result<Record, RejectedLine>) -> Self {
        match value {
            Ok(record) => Self::Record(record),
            Err(rejected) => Self::Rejected(rejected),
        }
    }
}
