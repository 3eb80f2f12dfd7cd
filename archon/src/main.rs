use archon_core::cli;
use archon_core::cli::simulate::{SimulateArgs, run_simulate};
use archon_core::cli::watch::{WatchArgs, run_watch};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "archon",
    version,
    about = "Archon: live FSM telemetry dashboard"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Follow the telemetry log and render it (default)
    Watch(WatchArgs),

    /// Write synthetic telemetry to a log file
    Simulate(SimulateArgs),

    /// Configuration tooling
    Config {
        #[command(subcommand)]
        cmd: cli::conf::ConfigCmd,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::Watch(args)) => run_watch(args),
        Some(Command::Simulate(args)) => run_simulate(args),
        Some(Command::Config { cmd }) => cli::conf::run(cmd),
        None => run_watch(WatchArgs::default()),
    };

    if let Err(e) = result {
        eprintln!("archon error: {e:#}");
        std::process::exit(1);
    }
}
