//! Wiring: Tailer (background task) → queue → Dispatcher (current task).

use crate::conf::ArchonConfig;
use crate::dispatch::{DispatchStats, Dispatcher, Presentation};
use crate::queue::{QueuePolicy, ingest_queue};
use crate::shutdown::ShutdownHandle;
use crate::tail::{TailSettings, TailSummary, Tailer, prepare_fresh};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub path: PathBuf,
    pub fresh: bool,
    pub tail: TailSettings,
    pub queue: QueuePolicy,
    pub cadence: Duration,
}

impl PipelineSettings {
    pub fn from_config(config: &ArchonConfig) -> Self {
        Self {
            path: config.tail.path.clone(),
            fresh: config.tail.fresh,
            tail: config.tail_settings(),
            queue: config.queue_policy(),
            cadence: config.cadence(),
        }
    }
}

pub struct PipelineReport<P> {
    pub presentation: P,
    pub tail: TailSummary,
    pub dispatch: DispatchStats,
}

/// Run until `shutdown` is triggered.
///
/// The dispatcher runs on the calling task, so `presentation` never leaves
/// it. The tailer is spawned onto the runtime.
pub async fn run_pipeline<P: Presentation>(
    settings: PipelineSettings,
    presentation: P,
    shutdown: &ShutdownHandle,
) -> Result<PipelineReport<P>> {
    if settings.fresh {
        prepare_fresh(&settings.path)
            .await
            .with_context(|| format!("failed to clear log file {}", settings.path.display()))?;
    }

    let (tx, rx) = ingest_queue(settings.queue);
    tracing::info!(
        path = %settings.path.display(),
        queue = ?settings.queue,
        cadence_ms = settings.cadence.as_millis() as u64,
        "pipeline starting"
    );

    let tailer = Tailer::new(settings.path, settings.tail);
    let tail_task = tokio::spawn(tailer.run(tx, shutdown.subscribe()));

    let (presentation, dispatch) = Dispatcher::new(rx, presentation)
        .run(settings.cadence, shutdown.subscribe())
        .await;

    // However the dispatcher stopped, the session is over.
    shutdown.trigger();
    let tail = tail_task.await.context("tailer task failed")?;

    Ok(PipelineReport {
        presentation,
        tail,
        dispatch,
    })
}
