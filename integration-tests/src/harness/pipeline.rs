use super::recorder::SharedRecorder;
use archon_core::pipeline::{PipelineReport, PipelineSettings, run_pipeline};
use archon_core::queue::QueuePolicy;
use archon_core::shutdown::ShutdownHandle;
use archon_core::tail::TailSettings;
use std::path::Path;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

/// Settings tuned for tests: short poll and cadence.
pub fn fast_settings(path: &Path) -> PipelineSettings {
    PipelineSettings {
        path: path.to_path_buf(),
        fresh: false,
        tail: TailSettings {
            poll_interval: Duration::from_millis(5),
            ..TailSettings::default()
        },
        queue: QueuePolicy::Bounded(1024),
        cadence: Duration::from_millis(10),
    }
}

/// A pipeline running on the test runtime, driving a [`SharedRecorder`].
pub struct RunningPipeline {
    pub recorder: SharedRecorder,
    pub shutdown: ShutdownHandle,
    task: JoinHandle<PipelineReport<SharedRecorder>>,
}

impl RunningPipeline {
    pub fn start(settings: PipelineSettings, recorder: SharedRecorder) -> Self {
        let shutdown = ShutdownHandle::new();
        let handle = shutdown.clone();
        let presentation = recorder.clone();

        let task = tokio::spawn(async move {
            run_pipeline(settings, presentation, &handle)
                .await
                .expect("pipeline failed")
        });

        Self {
            recorder,
            shutdown,
            task,
        }
    }

    /// Wait until the recorder has seen `count` views and rejections combined.
    pub async fn wait_for_items(&self, count: usize, timeout: Duration) -> bool {
        wait_until(timeout, || {
            let seen = self.recorder.lock();
            seen.views.len() + seen.rejected.len() >= count
        })
        .await
    }

    pub async fn stop(self) -> PipelineReport<SharedRecorder> {
        self.shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(5), self.task)
            .await
            .expect("pipeline did not stop in time")
            .expect("pipeline task panicked")
    }
}

/// Poll `condition` every few milliseconds until it holds or `timeout` passes.
pub async fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    loop {
        if condition() {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}
