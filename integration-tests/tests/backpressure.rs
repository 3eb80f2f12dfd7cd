use archon_core::queue::QueuePolicy;
use archon_core::record::{FsmState, Record};
use integration_tests::harness::{
    LogFixture, RunningPipeline, SharedRecorder, captured_events, fast_settings, init_test_tracing,
};
use pretty_assertions::assert_eq;
use std::time::Duration;
use tracing::Level;

/// A tiny queue and a slow renderer: the tailer must wait, never drop.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn slow_consumer_loses_nothing() {
    // Arrange
    init_test_tracing();
    let records: Vec<Record> = (1..=300)
        .map(|c| Record::new(c, FsmState::Ok, (c % 256) as u8, "Analog"))
        .collect();
    let fixture = LogFixture::with_records(&records);
    let mut settings = fast_settings(fixture.path());
    settings.queue = QueuePolicy::Bounded(2);
    settings.tail.push_grace = Duration::ZERO;
    let pipeline = RunningPipeline::start(settings, SharedRecorder::slow(Duration::from_micros(200)));

    // Act
    assert!(pipeline.wait_for_items(300, Duration::from_secs(20)).await);
    let report = pipeline.stop().await;

    // Assert
    let seen = report.presentation.snapshot();
    assert_eq!(seen.cycles(), (1..=300).collect::<Vec<_>>());
    assert_eq!(report.tail.records, 300);

    let backpressure = captured_events().into_iter().any(|e| {
        e.level == Level::WARN && e.message() == Some("ingest queue full; applying backpressure")
    });
    assert!(backpressure, "expected a backpressure warning");
}

/// Shutdown must not hang on a producer blocked against a full queue.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn shutdown_unblocks_a_waiting_producer() {
    let records: Vec<Record> = (1..=500)
        .map(|c| Record::new(c, FsmState::Flush, 1, "ML"))
        .collect();
    let fixture = LogFixture::with_records(&records);
    let mut settings = fast_settings(fixture.path());
    settings.queue = QueuePolicy::Bounded(1);
    settings.cadence = Duration::from_secs(1);
    let pipeline = RunningPipeline::start(settings, SharedRecorder::new());
    tokio::time::sleep(Duration::from_millis(100)).await;

    let report = pipeline.stop().await;

    assert!(report.tail.records < 500);
}
