use super::generator::TelemetryGenerator;
use crate::shutdown::ShutdownHandle;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct SimulationOptions {
    pub path: PathBuf,
    /// `None` runs until shutdown.
    pub count: Option<u64>,
    pub delay: Duration,
    pub malformed_ratio: f64,
    /// Echo every written line to stdout.
    pub echo: bool,
}

/// Truncate the target file, then append one flushed line per step.
/// Returns the number of lines written.
pub fn run_simulation(options: &SimulationOptions, shutdown: &ShutdownHandle) -> Result<u64> {
    let mut file = File::create(&options.path)
        .with_context(|| format!("failed to create {}", options.path.display()))?;
    let mut generator = TelemetryGenerator::new(options.malformed_ratio);

    tracing::info!(
        path = %options.path.display(),
        count = ?options.count,
        delay_ms = options.delay.as_millis() as u64,
        malformed_ratio = options.malformed_ratio,
        "simulation started"
    );

    let mut written = 0u64;
    while options.count.is_none_or(|count| written < count) {
        if shutdown.is_triggered() {
            break;
        }

        let line = generator.next_line();
        writeln!(file, "{line}")
            .and_then(|()| file.flush())
            .with_context(|| format!("failed to write to {}", options.path.display()))?;
        written += 1;

        if options.echo {
            println!("Logged: {line}");
        }

        if !options.delay.is_zero() {
            thread::sleep(options.delay);
        }
    }

    tracing::info!(written, "simulation finished");
    Ok(written)
}
