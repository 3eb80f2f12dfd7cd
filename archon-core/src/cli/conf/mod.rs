mod check;
mod dump;
mod init;

pub use check::*;
use clap::Subcommand;
pub use dump::*;
pub use init::*;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// Validate configuration and exit
    Check {
        /// Path to config file
        #[arg(default_value = "archon.hcl")]
        path: PathBuf,
    },

    /// Print resolved configuration as JSON
    Dump {
        /// Path to config file; built-in defaults when omitted
        path: Option<PathBuf>,
    },

    /// Write a commented starter config
    Init {
        /// Path to config file
        #[arg(default_value = "archon.hcl")]
        path: PathBuf,
    },
}

pub fn run(cmd: ConfigCmd) -> anyhow::Result<()> {
    match cmd {
        ConfigCmd::Check { path } => check(path),
        ConfigCmd::Dump { path } => dump(path),
        ConfigCmd::Init { path } => init(path),
    }
}
