//! Synthetic telemetry source.
//!
//! Writes lines in the same format a real FSM monitor would, optionally
//! mixing in malformed lines so the rejection path gets exercised.

mod generator;
mod writer;

#[cfg(test)]
mod tests;

pub use generator::{TRIGGERS, TelemetryGenerator, corrupt};
pub use writer::{SimulationOptions, run_simulation};
