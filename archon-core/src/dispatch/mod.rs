//! Applying ingested items to derived state.
//!
//! The dispatcher lives on the presentation loop. Each tick it drains the
//! ingest queue without blocking and hands every record, in arrival order, to
//! the [`Presentation`] as a fresh [`DerivedView`].

mod dispatcher;
mod presentation;
mod view;

#[cfg(test)]
mod tests;

pub use dispatcher::{DEFAULT_CADENCE, DispatchStats, Dispatcher, DrainOutcome};
pub use presentation::Presentation;
pub use view::{DerivedView, EntropyLevel, StallRisk, stall_probability};
