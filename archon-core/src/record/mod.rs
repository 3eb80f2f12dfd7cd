//! Typed representation of one telemetry log line.
//!
//! Every line the tailer reads ends up as exactly one [`Ingested`] item:
//! either a validated [`Record`] or a [`RejectedLine`] carrying the raw text
//! and the reason it was refused. Both are immutable once built.

mod format;
mod types;


pub use types::*;
