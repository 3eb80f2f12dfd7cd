use crate::record::{Record, StateSeverity};
use serde::Serialize;

const ENTROPY_NORMAL_MAX: u8 = 120;
const ENTROPY_ELEVATED_MAX: u8 = 180;
const RISK_LOW_MAX: u8 = 40;
const RISK_MEDIUM_MAX: u8 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntropyLevel {
    Normal,
    Elevated,
    High,
}

impl EntropyLevel {
    pub fn classify(entropy: u8) -> Self {
        if entropy <= ENTROPY_NORMAL_MAX {
            Self::Normal
        } else if entropy <= ENTROPY_ELEVATED_MAX {
            Self::Elevated
        } else {
            Self::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Elevated => "Elevated",
            Self::High => "High Entropy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StallRisk {
    Low,
    Medium,
    High,
}

impl StallRisk {
    pub fn classify(probability: u8) -> Self {
        if probability <= RISK_LOW_MAX {
            Self::Low
        } else if probability <= RISK_MEDIUM_MAX {
            Self::Medium
        } else {
            Self::High
        }
    }
}

/// `round(entropy / 255 * 100)`, clamped to 100.
///
/// Integer rounding is exact here: no entropy in 0..=255 lands on a .5 tie.
pub fn stall_probability(entropy: u8) -> u8 {
    let scaled = (u32::from(entropy) * 100 + 127) / 255;
    scaled.min(100) as u8
}

/// Everything the presentation needs about the latest record.
///
/// Rebuilt wholesale for every record; never patched in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedView {
    pub record: Record,
    pub severity: StateSeverity,
    pub entropy_level: EntropyLevel,
    pub stall_probability: u8,
    pub stall_risk: StallRisk,
}

impl DerivedView {
    pub fn from_record(record: Record) -> Self {
        let probability = stall_probability(record.entropy);
        Self {
            severity: record.state.severity(),
            entropy_level: EntropyLevel::classify(record.entropy),
            stall_probability: probability,
            stall_risk: StallRisk::classify(probability),
            record,
        }
    }
}
