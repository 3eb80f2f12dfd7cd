use crate::conf::{ArchonConfig, resolve_config};
use crate::logging::{LogTarget, init_logging};
use crate::pipeline::{PipelineSettings, run_pipeline};
use crate::present::{ViewMode, default_view_mode, stdout_presentation};
use crate::shutdown::ShutdownHandle;
use crate::tail::StartPosition;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default)]
pub struct WatchArgs {
    /// Path to an archon.hcl config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Telemetry log to follow (overrides tail.path)
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Output mode; defaults to dashboard on a terminal, json otherwise
    #[arg(long, value_enum)]
    pub mode: Option<ViewMode>,

    /// Skip content already in the file
    #[arg(long)]
    pub from_end: bool,

    /// Empty the log file before following it
    #[arg(long)]
    pub fresh: bool,

    /// Queue capacity; 0 means unbounded
    #[arg(long)]
    pub queue_capacity: Option<usize>,

    /// Disable dashboard colors
    #[arg(long)]
    pub no_color: bool,
}

impl WatchArgs {
    /// Layer command-line overrides on top of the file config.
    pub fn apply(&self, cfg: &mut ArchonConfig) {
        if let Some(file) = &self.file {
            cfg.tail.path = file.clone();
        }
        if self.from_end {
            cfg.tail.start = StartPosition::End;
        }
        if self.fresh {
            cfg.tail.fresh = true;
        }
        if let Some(capacity) = self.queue_capacity {
            cfg.queue.capacity = capacity;
        }
        if self.no_color {
            cfg.dashboard.color = false;
        }
    }
}

pub fn run_watch(args: WatchArgs) -> Result<()> {
    let mut cfg = resolve_config(args.config.as_deref())?;
    args.apply(&mut cfg);
    cfg.validate()?;

    let mode = args.mode.unwrap_or_else(default_view_mode);
    let _log_guard = init_logging(
        &cfg.logging.level,
        LogTarget::for_terminal(&cfg.logging, mode.owns_terminal()),
    );

    let shutdown = ShutdownHandle::new();
    shutdown.install_ctrlc_handler()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("archon")
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;

    let presentation = stdout_presentation(mode, cfg.dashboard_options());
    let report = runtime.block_on(run_pipeline(
        PipelineSettings::from_config(&cfg),
        presentation,
        &shutdown,
    ))?;

    tracing::info!(
        lines = report.tail.lines,
        records = report.tail.records,
        rejected = report.tail.rejected,
        truncations = report.tail.truncations,
        applied = report.dispatch.applied,
        ticks = report.dispatch.ticks,
        "watch finished"
    );

    if mode.owns_terminal() {
        println!(
            "archon: {} records, {} rejected, {} truncations",
            report.tail.records, report.tail.rejected, report.tail.truncations
        );
    }

    Ok(())
}
