use crate::conf::{ConfigError, load_config};
use crate::tail::StartPosition;
use std::path::PathBuf;

pub fn check(path: PathBuf) -> anyhow::Result<()> {
    match load_config(&path) {
        Ok(cfg) => {
            println!("✔ Config loaded successfully");
            println!("✔ tailing {}", cfg.tail.path.display());
            println!(
                "✔ start at {}",
                match cfg.tail.start {
                    StartPosition::Beginning => "beginning",
                    StartPosition::End => "end",
                }
            );
            match cfg.queue_policy().capacity() {
                Some(capacity) => println!("✔ bounded queue ({capacity})"),
                None => println!("✔ unbounded queue"),
            }
            println!("✔ dispatch every {}ms", cfg.dispatch.cadence_ms);
            Ok(())
        }
        Err(err) => {
            print_config_error(&err);
            std::process::exit(1);
        }
    }
}

fn print_config_error(err: &ConfigError) {
    eprintln!("{err}");
    if let Some(hint) = config_error_hint(err) {
        eprintln!();
        eprintln!("{hint}");
    }
}

pub fn config_error_hint(err: &ConfigError) -> Option<&'static str> {
    match err {
        ConfigError::ReadFile { .. } => Some(
            "Create a starter config with:\n\
             \n\
             archon config init",
        ),

        ConfigError::Parse { .. } => Some(
            "archon.hcl uses blocks of attributes.\n\
             \n\
             Example:\n\
             \n\
             tail {\n\
             \x20 path  = \"fsm_log.txt\"\n\
             \x20 start = \"end\"\n\
             }",
        ),

        ConfigError::Validation { .. } => None,
    }
}
