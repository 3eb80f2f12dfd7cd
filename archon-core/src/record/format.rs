use super::types::Record;
use std::fmt;

/// Renders the wire form, without the terminating line feed:
///
/// `[Cycle 42] State: STALL | Entropy: 190 | Trigger: Analog`
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Cycle {}] State: {} | Entropy: {} | Trigger: {}",
            self.cycle, self.state, self.entropy, self.trigger
        )
    }
}
