use super::cursor::{FINGERPRINT_LEN, TailCursor};
use crate::parse::parse_line;
use crate::queue::{IngestSender, QueueError};
use crate::record::Ingested;
use crate::shutdown::{ShutdownSignal, sleep_or_shutdown};
use serde::{Deserialize, Serialize};
use std::io::{self, SeekFrom};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncReadExt, AsyncSeekExt};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10);
pub const DEFAULT_PUSH_GRACE: Duration = Duration::from_millis(50);
pub const DEFAULT_READ_CHUNK: usize = 64 * 1024;
const BOUNDARY_SCAN_CHUNK: u64 = 4 * 1024;

/// Where the first read of a session begins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StartPosition {
    /// Read whatever the file already holds.
    #[default]
    Beginning,
    /// Skip existing content; only lines appended after start are emitted.
    End,
}

#[derive(Debug, Clone)]
pub struct TailSettings {
    pub start: StartPosition,
    /// Idle wait between polls when nothing new is available.
    pub poll_interval: Duration,
    /// How long a push may wait on a full queue before backpressure is logged.
    pub push_grace: Duration,
    /// Upper bound on bytes read per poll.
    pub read_chunk: usize,
}

impl Default for TailSettings {
    fn default() -> Self {
        Self {
            start: StartPosition::default(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            push_grace: DEFAULT_PUSH_GRACE,
            read_chunk: DEFAULT_READ_CHUNK,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TailSummary {
    pub lines: u64,
    pub records: u64,
    pub rejected: u64,
    pub truncations: u64,
    pub io_errors: u64,
}

enum ReadOutcome {
    Lines(Vec<String>),
    Idle,
    /// File shrank, or the path now names a different file.
    Restarted,
}

enum Stop {
    Shutdown,
    ConsumerGone,
}

pub struct Tailer {
    path: PathBuf,
    settings: TailSettings,
}

impl Tailer {
    pub fn new(path: impl Into<PathBuf>, settings: TailSettings) -> Self {
        Self {
            path: path.into(),
            settings,
        }
    }

    /// Follow the file until shutdown is signaled or the consumer goes away.
    ///
    /// I/O problems are logged and retried at the poll interval; they never
    /// end the task.
    pub async fn run(self, tx: IngestSender, mut shutdown: ShutdownSignal) -> TailSummary {
        let mut summary = TailSummary::default();
        let mut cursor = TailCursor::default();
        let mut file: Option<File> = None;
        let mut positioned = false;

        tracing::info!(
            path = %self.path.display(),
            start = ?self.settings.start,
            poll_ms = self.settings.poll_interval.as_millis() as u64,
            "tailer started"
        );

        let stop = loop {
            if shutdown.is_triggered() {
                break Stop::Shutdown;
            }

            //-----------------------------------------------------------------
            // (Re)open
            //-----------------------------------------------------------------
            if file.is_none() {
                match self.open(&mut cursor, &mut positioned).await {
                    Ok(opened) => file = Some(opened),
                    Err(e) => {
                        summary.io_errors += 1;
                        tracing::warn!(path = %self.path.display(), error = %e, "failed to open log file; retrying");
                        if sleep_or_shutdown(self.settings.poll_interval, &mut shutdown).await {
                            break Stop::Shutdown;
                        }
                        continue;
                    }
                }
            }
            let Some(handle) = file.as_mut() else {
                continue;
            };

            //-----------------------------------------------------------------
            // Read
            //-----------------------------------------------------------------
            let lines = match self.read_available(handle, &mut cursor).await {
                Ok(ReadOutcome::Lines(lines)) => lines,
                Ok(ReadOutcome::Idle) => {
                    if tx.is_closed() {
                        break Stop::ConsumerGone;
                    }
                    if sleep_or_shutdown(self.settings.poll_interval, &mut shutdown).await {
                        break Stop::Shutdown;
                    }
                    continue;
                }
                Ok(ReadOutcome::Restarted) => {
                    summary.truncations += 1;
                    tracing::info!(
                        path = %self.path.display(),
                        previous_offset = cursor.read_position(),
                        "log file truncated or replaced; restarting from the beginning"
                    );
                    cursor.reset();
                    file = None;
                    continue;
                }
                Err(e) => {
                    summary.io_errors += 1;
                    tracing::warn!(
                        path = %self.path.display(),
                        offset = cursor.read_position(),
                        error = %e,
                        "failed to read log file; reopening"
                    );
                    file = None;
                    if sleep_or_shutdown(self.settings.poll_interval, &mut shutdown).await {
                        break Stop::Shutdown;
                    }
                    continue;
                }
            };

            //-----------------------------------------------------------------
            // Parse + push
            //-----------------------------------------------------------------
            if let Err(stop) = self.forward(lines, &tx, &mut summary, &mut shutdown).await {
                break stop;
            }
        };

        drop(file);

        let reason = match stop {
            Stop::Shutdown => "shutdown",
            Stop::ConsumerGone => "consumer_gone",
        };
        tracing::info!(
            path = %self.path.display(),
            reason,
            lines = summary.lines,
            records = summary.records,
            rejected = summary.rejected,
            truncations = summary.truncations,
            io_errors = summary.io_errors,
            "tailer stopped"
        );

        summary
    }

    async fn open(&self, cursor: &mut TailCursor, positioned: &mut bool) -> io::Result<File> {
        let mut file = open_or_create(&self.path).await?;

        // The start policy applies to the first successful open only; later
        // reopens keep the cursor.
        if !*positioned {
            if self.settings.start == StartPosition::End {
                let len = file.metadata().await?.len();
                let (boundary, history) = last_line_boundary(&mut file, len).await?;
                *cursor = TailCursor::resuming_after(boundary, &history);
                tracing::debug!(offset = boundary, len, "skipping existing content");
            }
            *positioned = true;
        }

        Ok(file)
    }

    async fn read_available(
        &self,
        file: &mut File,
        cursor: &mut TailCursor,
    ) -> io::Result<ReadOutcome> {
        let len = tokio::fs::metadata(&self.path).await?.len();

        if cursor.is_truncated_by(len) {
            return Ok(ReadOutcome::Restarted);
        }

        // Re-read the tail of what was already consumed along with the new
        // bytes; if it no longer matches, the file was rewritten in place.
        let (check_from, expected) = cursor.expected_window();
        let fresh_len = (len - cursor.read_position()).min(self.settings.read_chunk as u64);
        let want = expected.len() as u64 + fresh_len;
        if want == 0 {
            return Ok(ReadOutcome::Idle);
        }

        let mut buf = Vec::with_capacity(want as usize);
        file.seek(SeekFrom::Start(check_from)).await?;
        (&mut *file).take(want).read_to_end(&mut buf).await?;

        if !buf.starts_with(&expected) {
            return Ok(ReadOutcome::Restarted);
        }

        let fresh = &buf[expected.len()..];
        if fresh.is_empty() {
            if fresh_len == 0 {
                return Ok(ReadOutcome::Idle);
            }
            // The path reports more data than our handle can see.
            return Ok(ReadOutcome::Restarted);
        }

        Ok(ReadOutcome::Lines(cursor.feed(fresh)))
    }

    async fn forward(
        &self,
        lines: Vec<String>,
        tx: &IngestSender,
        summary: &mut TailSummary,
        shutdown: &mut ShutdownSignal,
    ) -> Result<(), Stop> {
        for line in lines {
            summary.lines += 1;

            let item = Ingested::from(parse_line(&line));
            match &item {
                Ingested::Record(_) => summary.records += 1,
                Ingested::Rejected(rejected) => {
                    summary.rejected += 1;
                    tracing::debug!(reason = %rejected.reason, line = %rejected.line, "malformed line");
                }
            }

            match tx.push(item, self.settings.push_grace, shutdown).await {
                Ok(()) => {}
                Err(QueueError::Cancelled) => return Err(Stop::Shutdown),
                Err(QueueError::Closed) => return Err(Stop::ConsumerGone),
            }
        }

        Ok(())
    }
}

async fn open_or_create(path: &Path) -> io::Result<File> {
    match File::open(path).await {
        Ok(file) => Ok(file),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "log file not found; creating empty file");
            OpenOptions::new().create(true).append(true).open(path).await?;
            File::open(path).await
        }
        Err(e) => Err(e),
    }
}

/// Offset just past the last line feed before `len` (0 if there is none),
/// with up to [`FINGERPRINT_LEN`] bytes of content preceding it.
async fn last_line_boundary(file: &mut File, len: u64) -> io::Result<(u64, Vec<u8>)> {
    let mut end = len;
    while end > 0 {
        let start = end.saturating_sub(BOUNDARY_SCAN_CHUNK);
        let mut chunk = vec![0u8; (end - start) as usize];
        file.seek(SeekFrom::Start(start)).await?;
        file.read_exact(&mut chunk).await?;

        if let Some(pos) = chunk.iter().rposition(|b| *b == b'\n') {
            let boundary = start + pos as u64 + 1;
            let history_start = boundary.saturating_sub(FINGERPRINT_LEN as u64);
            let mut history = vec![0u8; (boundary - history_start) as usize];
            file.seek(SeekFrom::Start(history_start)).await?;
            file.read_exact(&mut history).await?;
            return Ok((boundary, history));
        }
        end = start;
    }

    Ok((0, Vec::new()))
}

/// Create or empty the log file so a session starts from a clean slate.
pub async fn prepare_fresh(path: &Path) -> io::Result<()> {
    File::create(path).await?;
    tracing::info!(path = %path.display(), "cleared log file");
    Ok(())
}
