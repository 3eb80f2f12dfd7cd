use super::presentation::Presentation;
use super::view::DerivedView;
use crate::queue::{IngestReceiver, TryRecvError};
use crate::record::Ingested;
use crate::shutdown::ShutdownSignal;
use serde::Serialize;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

pub const DEFAULT_CADENCE: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DispatchStats {
    pub applied: u64,
    pub rejected: u64,
    pub ticks: u64,
}

/// What one drain pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainOutcome {
    pub applied: usize,
    pub rejected: usize,
    /// The producer is gone and the queue is empty.
    pub disconnected: bool,
}

pub struct Dispatcher<P> {
    rx: IngestReceiver,
    presentation: P,
    current: Option<DerivedView>,
    stats: DispatchStats,
}

impl<P: Presentation> Dispatcher<P> {
    pub fn new(rx: IngestReceiver, presentation: P) -> Self {
        Self {
            rx,
            presentation,
            current: None,
            stats: DispatchStats::default(),
        }
    }

    pub fn current(&self) -> Option<&DerivedView> {
        self.current.as_ref()
    }

    pub fn stats(&self) -> DispatchStats {
        self.stats
    }

    pub fn presentation(&self) -> &P {
        &self.presentation
    }

    /// Drain what was queued when the tick began, in FIFO order. Never waits.
    ///
    /// Items pushed during the drain are left for the next tick, so a
    /// producer that keeps up cannot stretch one tick indefinitely.
    pub fn tick(&mut self) -> DrainOutcome {
        let mut outcome = DrainOutcome::default();
        let budget = self.rx.len();

        for _ in 0..budget {
            match self.rx.try_pop() {
                Ok(Ingested::Record(record)) => {
                    let view = DerivedView::from_record(record);
                    self.presentation.update(&view);
                    self.current = Some(view);
                    outcome.applied += 1;
                }
                Ok(Ingested::Rejected(rejected)) => {
                    tracing::warn!(
                        reason = %rejected.reason,
                        line = %rejected.line,
                        "skipping malformed log line"
                    );
                    self.presentation.diagnostic(&rejected);
                    outcome.rejected += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    outcome.disconnected = true;
                    break;
                }
            }
        }
        outcome.disconnected |= self.rx.is_disconnected();

        self.stats.applied += outcome.applied as u64;
        self.stats.rejected += outcome.rejected as u64;
        self.stats.ticks += 1;
        self.presentation.tick();

        outcome
    }

    /// Tick on `cadence` until shutdown or until the producer disconnects.
    /// Hands the presentation back once stopped.
    pub async fn run(mut self, cadence: Duration, mut shutdown: ShutdownSignal) -> (P, DispatchStats) {
        let mut ticker = tokio::time::interval(cadence);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::debug!(cadence_ms = cadence.as_millis() as u64, "dispatcher started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if self.tick().disconnected {
                        tracing::info!("ingest queue disconnected; dispatcher stopping");
                        break;
                    }
                }
                _ = shutdown.triggered() => break,
            }
        }

        self.presentation.close();

        tracing::info!(
            applied = self.stats.applied,
            rejected = self.stats.rejected,
            ticks = self.stats.ticks,
            "dispatcher stopped"
        );

        (self.presentation, self.stats)
    }
}
