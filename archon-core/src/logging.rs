use crate::conf::LoggingConfig;
use std::io;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt};

/// Where log output goes.
#[derive(Debug, Clone)]
pub enum LogTarget {
    Stderr,
    /// Used while the dashboard owns the terminal.
    File { dir: PathBuf, file_name: String },
}

impl LogTarget {
    pub fn for_terminal(config: &LoggingConfig, terminal_taken: bool) -> Self {
        if terminal_taken {
            Self::File {
                dir: config.dir.clone(),
                file_name: config.file_name.clone(),
            }
        } else {
            Self::Stderr
        }
    }
}

/// Install the global subscriber: JSON events, flattened, filtered by
/// `RUST_LOG` or `default_level`.
///
/// The returned guard flushes file output on drop; keep it alive for the
/// life of the process.
pub fn init_logging(default_level: &str, target: LogTarget) -> Option<WorkerGuard> {
    // If tokio-console is enabled, DO NOT install the normal subscriber
    if std::env::var("TOKIO_CONSOLE").is_ok() {
        console_subscriber::init();
        return None;
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match target {
        LogTarget::Stderr => {
            fmt()
                .with_env_filter(filter)
                .json()
                .flatten_event(true)
                .with_writer(io::stderr)
                .init();
            None
        }
        LogTarget::File { dir, file_name } => {
            if let Err(e) = std::fs::create_dir_all(&dir) {
                eprintln!("archon: cannot create log dir {}: {e}", dir.display());
                return init_logging(default_level, LogTarget::Stderr);
            }
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            fmt()
                .with_env_filter(filter)
                .json()
                .flatten_event(true)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            Some(guard)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_sends_logs_to_file() {
        let config = LoggingConfig::default();

        let target = LogTarget::for_terminal(&config, true);

        let LogTarget::File { dir, file_name } = target else {
            panic!("expected file target");
        };
        assert_eq!(dir, PathBuf::from("logs"));
        assert_eq!(file_name, "archon.log");
    }

    #[test]
    fn line_modes_log_to_stderr() {
        let target = LogTarget::for_terminal(&LoggingConfig::default(), false);

        assert!(matches!(target, LogTarget::Stderr));
    }
}
