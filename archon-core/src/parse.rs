//! Line parser.
//!
//! Expected shape:
//!
//! `[Cycle <int>] State: <STATE> | Entropy: <0-255> | Trigger: <label>`
//!
//! Parsing is pure. Every failure path returns a [`RejectedLine`] with the
//! line as read; nothing here panics on bad input.

use crate::record::{FsmState, Record, RejectReason, RejectedLine};
use std::num::IntErrorKind;

const SEGMENT_DELIMITER: &str = " | ";
const STATE_MARKER: &str = "] State: ";
const CYCLE_PREFIX: &str = "[Cycle ";
const FIELD_SEPARATOR: &str = ": ";

pub fn parse_line(line: &str) -> Result<Record, RejectedLine> {
    let reject = |reason| RejectedLine::new(line, reason);

    let segments: Vec<&str> = line.split(SEGMENT_DELIMITER).collect();
    let [head, entropy_segment, trigger_segment] = segments[..] else {
        return Err(reject(RejectReason::WrongSegmentCount));
    };

    //-------------------------------------------------------------------------
    // Cycle and state
    //-------------------------------------------------------------------------
    let (cycle_part, state_part) = head
        .split_once(STATE_MARKER)
        .ok_or_else(|| reject(RejectReason::MissingStateMarker))?;

    let cycle_digits = cycle_part.strip_prefix(CYCLE_PREFIX).unwrap_or(cycle_part);
    let cycle = cycle_digits
        .trim()
        .parse::<u64>()
        .map_err(|_| reject(RejectReason::NonIntegerCycle))?;

    let state = FsmState::from_wire(state_part);

    //-------------------------------------------------------------------------
    // Entropy
    //-------------------------------------------------------------------------
    let (_, entropy_text) = entropy_segment
        .split_once(FIELD_SEPARATOR)
        .ok_or_else(|| reject(RejectReason::NonIntegerEntropy))?;
    let entropy = parse_entropy(entropy_text).map_err(reject)?;

    //-------------------------------------------------------------------------
    // Trigger
    //-------------------------------------------------------------------------
    let trigger = trigger_segment
        .split_once(FIELD_SEPARATOR)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| reject(RejectReason::EmptyTrigger))?;

    Ok(Record::new(cycle, state, entropy, trigger))
}

fn parse_entropy(text: &str) -> Result<u8, RejectReason> {
    let value = text.trim().parse::<i64>().map_err(|e| match e.kind() {
        // Well-formed digits that simply do not fit are a range problem.
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => RejectReason::EntropyOutOfRange,
        _ => RejectReason::NonIntegerEntropy,
    })?;

    u8::try_from(value).map_err(|_| RejectReason::EntropyOutOfRange)
}
