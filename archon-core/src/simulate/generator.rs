use crate::record::{FsmState, Record, RejectReason};
use rand::rngs::ThreadRng;
use rand::seq::IndexedRandom;
use rand::{Rng, rng};

pub const TRIGGERS: [&str; 5] = ["ML", "Analog", "Entropy Logic", "AHO", "None"];

pub struct TelemetryGenerator<R> {
    rng: R,
    cycle: u64,
    malformed_ratio: f64,
}

impl TelemetryGenerator<ThreadRng> {
    pub fn new(malformed_ratio: f64) -> Self {
        Self::with_rng(rng(), malformed_ratio)
    }
}

impl<R: Rng> TelemetryGenerator<R> {
    /// `malformed_ratio` is clamped to 0.0..=1.0.
    pub fn with_rng(rng: R, malformed_ratio: f64) -> Self {
        Self {
            rng,
            cycle: 1,
            malformed_ratio: if malformed_ratio.is_nan() {
                0.0
            } else {
                malformed_ratio.clamp(0.0, 1.0)
            },
        }
    }

    pub fn next_record(&mut self) -> Record {
        let cycle = self.cycle;
        self.cycle += 1;

        let state = *FsmState::REPORTED
            .choose(&mut self.rng)
            .unwrap_or(&FsmState::Ok);
        let trigger = *TRIGGERS.choose(&mut self.rng).unwrap_or(&"None");
        let entropy = self.rng.random_range(0..=255u8);

        Record::new(cycle, state, entropy, trigger)
    }

    /// The next wire line; occasionally corrupted.
    pub fn next_line(&mut self) -> String {
        let record = self.next_record();
        if self.malformed_ratio > 0.0 && self.rng.random_bool(self.malformed_ratio) {
            let reason = *RejectReason::ALL
                .choose(&mut self.rng)
                .unwrap_or(&RejectReason::WrongSegmentCount);
            corrupt(&record, reason)
        } else {
            record.to_string()
        }
    }
}

/// Render `record` so that parsing it fails with exactly `reason`.
pub fn corrupt(record: &Record, reason: RejectReason) -> String {
    let Record {
        cycle,
        state,
        entropy,
        trigger,
    } = record;

    match reason {
        RejectReason::WrongSegmentCount => {
            format!("[Cycle {cycle}] State: {state} | Entropy: {entropy}")
        }
        RejectReason::MissingStateMarker => {
            format!("[Cycle {cycle}] Status: {state} | Entropy: {entropy} | Trigger: {trigger}")
        }
        RejectReason::NonIntegerCycle => {
            format!("[Cycle #{cycle}] State: {state} | Entropy: {entropy} | Trigger: {trigger}")
        }
        RejectReason::EntropyOutOfRange => {
            let out_of_range = 256 + u32::from(*entropy);
            format!("[Cycle {cycle}] State: {state} | Entropy: {out_of_range} | Trigger: {trigger}")
        }
        RejectReason::NonIntegerEntropy => {
            format!("[Cycle {cycle}] State: {state} | Entropy: 0x{entropy:02x} | Trigger: {trigger}")
        }
        RejectReason::EmptyTrigger => {
            format!("[Cycle {cycle}] State: {state} | Entropy: {entropy} | Trigger: ")
        }
    }
}
