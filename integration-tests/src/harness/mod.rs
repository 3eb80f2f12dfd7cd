pub mod fixture;
pub mod pipeline;
pub mod recorder;
pub mod tracing;

pub use fixture::LogFixture;
pub use pipeline::{RunningPipeline, fast_settings, wait_until};
pub use recorder::{Recorded, SharedRecorder};
pub use tracing::{CapturedEvent, captured_events, init_test_tracing};
