//! Following a growing log file.
//!
//! [`TailCursor`] owns the byte bookkeeping (what has been handed out as
//! complete lines, what is still a partial trailing line). [`Tailer`] wraps it
//! in the async poll loop that opens, re-opens, reads and pushes.

mod cursor;
mod tailer;


pub use cursor::{FINGERPRINT_LEN, TailCursor};
pub use tailer::{StartPosition, TailSettings, TailSummary, Tailer, prepare_fresh};
