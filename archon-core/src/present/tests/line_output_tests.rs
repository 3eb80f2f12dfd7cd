use crate::dispatch::{DerivedView, Presentation};
use crate::present::{JsonPresentation, PrettyPresentation, format_rejected, format_view};
use crate::record::{FsmState, Record, RejectReason, RejectedLine};
use pretty_assertions::assert_eq;
use serde_json::Value;

fn view() -> DerivedView {
    DerivedView::from_record(Record::new(42, FsmState::Stall, 190, "Analog"))
}

#[test]
fn pretty_view_line() {
    assert_eq!(
        format_view(&view()),
        "[cycle 42] STALL entropy=190 (High) p_stall=75% (High) trigger=Analog"
    );
}

#[test]
fn pretty_rejected_line() {
    let rejected = RejectedLine::new("[Cycle x] ...", RejectReason::NonIntegerCycle);

    assert_eq!(
        format_rejected(&rejected),
        "[rejected] NON_INTEGER_CYCLE: [Cycle x] ..."
    );
}

#[test]
fn pretty_presentation_writes_one_line_per_item() {
    let mut pretty = PrettyPresentation::new(Vec::new());

    pretty.update(&view());
    pretty.diagnostic(&RejectedLine::new("junk", RejectReason::WrongSegmentCount));
    pretty.tick();

    let out = String::from_utf8(pretty.into_inner()).unwrap();
    assert_eq!(out.lines().count(), 2);
    assert!(out.lines().nth(1).unwrap().starts_with("[rejected] WRONG_SEGMENT_COUNT"));
}

#[test]
fn json_presentation_emits_tagged_objects() {
    // Arrange
    let mut json = JsonPresentation::new(Vec::new());

    // Act
    json.update(&view());
    json.diagnostic(&RejectedLine::new("junk", RejectReason::WrongSegmentCount));
    let out = String::from_utf8(json.into_inner()).unwrap();

    // Assert
    let lines: Vec<Value> = out
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["type"], "view");
    assert_eq!(lines[0]["record"]["cycle"], 42);
    assert_eq!(lines[0]["record"]["state"], "STALL");
    assert_eq!(lines[0]["entropy_level"], "HIGH");
    assert_eq!(lines[0]["stall_probability"], 75);
    assert_eq!(lines[1]["type"], "rejected");
    assert_eq!(lines[1]["reason"], "WRONG_SEGMENT_COUNT");
    assert_eq!(lines[1]["line"], "junk");
}
