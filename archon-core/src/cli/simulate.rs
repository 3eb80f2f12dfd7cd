use crate::logging::{LogTarget, init_logging};
use crate::shutdown::ShutdownHandle;
use crate::simulate::{SimulationOptions, run_simulation};
use anyhow::{Result, ensure};
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    /// File to write (truncated first)
    #[arg(long, default_value = "fsm_log.txt")]
    pub file: PathBuf,

    /// Number of lines to write; runs until Ctrl+C when omitted
    #[arg(long)]
    pub count: Option<u64>,

    /// Delay between lines in milliseconds
    #[arg(long, default_value_t = 500)]
    pub delay_ms: u64,

    /// Fraction of lines (0.0 to 1.0) written malformed
    #[arg(long, default_value_t = 0.0)]
    pub malformed_ratio: f64,

    /// Do not echo written lines
    #[arg(short, long)]
    pub quiet: bool,
}

impl SimulateArgs {
    pub fn options(&self) -> Result<SimulationOptions> {
        ensure!(
            (0.0..=1.0).contains(&self.malformed_ratio),
            "--malformed-ratio must be between 0.0 and 1.0, got {}",
            self.malformed_ratio
        );

        Ok(SimulationOptions {
            path: self.file.clone(),
            count: self.count,
            delay: Duration::from_millis(self.delay_ms),
            malformed_ratio: self.malformed_ratio,
            echo: !self.quiet,
        })
    }
}

pub fn run_simulate(args: SimulateArgs) -> Result<()> {
    let options = args.options()?;
    let _log_guard = init_logging("info", LogTarget::Stderr);

    let shutdown = ShutdownHandle::new();
    shutdown.install_ctrlc_handler()?;

    let written = run_simulation(&options, &shutdown)?;
    if !options.echo {
        println!("✔ Wrote {written} lines to {}", options.path.display());
    }

    Ok(())
}
