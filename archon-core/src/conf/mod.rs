mod error;
mod loader;
mod types;

#[cfg(test)]
mod tests;

pub use error::{ConfigError, ValidationIssue};
pub use loader::{DEFAULT_CONFIG_FILE, load_config, parse_config, resolve_config};
pub use types::*;
