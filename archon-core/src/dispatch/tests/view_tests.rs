use crate::dispatch::{DerivedView, EntropyLevel, StallRisk, stall_probability};
use crate::record::{FsmState, Record, StateSeverity};
use pretty_assertions::assert_eq;

#[test]
fn entropy_level_boundaries() {
    assert_eq!(EntropyLevel::classify(0), EntropyLevel::Normal);
    assert_eq!(EntropyLevel::classify(120), EntropyLevel::Normal);
    assert_eq!(EntropyLevel::classify(121), EntropyLevel::Elevated);
    assert_eq!(EntropyLevel::classify(180), EntropyLevel::Elevated);
    assert_eq!(EntropyLevel::classify(181), EntropyLevel::High);
    assert_eq!(EntropyLevel::classify(255), EntropyLevel::High);
}

#[test]
fn stall_probability_endpoints_and_rounding() {
    assert_eq!(stall_probability(0), 0);
    assert_eq!(stall_probability(255), 100);
    assert_eq!(stall_probability(178), 70);
    // 1/255*100 = 0.39 -> 0, 2/255*100 = 0.78 -> 1
    assert_eq!(stall_probability(1), 0);
    assert_eq!(stall_probability(2), 1);
    assert_eq!(stall_probability(102), 40);
}

#[test]
fn stall_probability_matches_float_rounding_for_every_entropy() {
    for entropy in 0..=255u8 {
        let expected = ((f64::from(entropy) / 255.0) * 100.0).round().min(100.0) as u8;
        assert_eq!(stall_probability(entropy), expected, "entropy {entropy}");
    }
}

#[test]
fn stall_risk_boundaries() {
    assert_eq!(StallRisk::classify(0), StallRisk::Low);
    assert_eq!(StallRisk::classify(40), StallRisk::Low);
    assert_eq!(StallRisk::classify(41), StallRisk::Medium);
    assert_eq!(StallRisk::classify(70), StallRisk::Medium);
    assert_eq!(StallRisk::classify(71), StallRisk::High);
    assert_eq!(StallRisk::classify(100), StallRisk::High);
}

#[test]
fn derived_view_combines_classifications() {
    // Arrange
    let record = Record::new(42, FsmState::Stall, 178, "Analog");

    // Act
    let view = DerivedView::from_record(record.clone());

    // Assert
    assert_eq!(
        view,
        DerivedView {
            record,
            severity: StateSeverity::Warning,
            entropy_level: EntropyLevel::Elevated,
            stall_probability: 70,
            stall_risk: StallRisk::Medium,
        }
    );
}

#[test]
fn derived_view_serializes_with_codes() {
    let view = DerivedView::from_record(Record::new(1, FsmState::Lock, 255, "AHO"));

    let json = serde_json::to_value(&view).unwrap();

    assert_eq!(json["record"]["state"], "LOCK");
    assert_eq!(json["severity"], "CRITICAL");
    assert_eq!(json["entropy_level"], "HIGH");
    assert_eq!(json["stall_probability"], 100);
    assert_eq!(json["stall_risk"], "HIGH");
}
