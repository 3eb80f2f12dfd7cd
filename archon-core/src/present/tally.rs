use crate::record::RejectReason;
use serde::Serialize;
use std::collections::BTreeMap;

/// Running counts of what the dispatcher delivered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestTally {
    pub records: u64,
    pub rejected: BTreeMap<RejectReason, u64>,
}

impl IngestTally {
    pub fn record(&mut self) {
        self.records += 1;
    }

    pub fn reject(&mut self, reason: RejectReason) {
        *self.rejected.entry(reason).or_insert(0) += 1;
    }

    pub fn rejected_total(&self) -> u64 {
        self.rejected.values().sum()
    }
}
