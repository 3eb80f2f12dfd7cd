use super::error::ConfigError;
use super::types::ArchonConfig;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "archon.hcl";

/// Read, parse and validate a config file.
pub fn load_config(path: &Path) -> Result<ArchonConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    parse_config(&text, path)
}

pub fn parse_config(text: &str, origin: &Path) -> Result<ArchonConfig, ConfigError> {
    let config: ArchonConfig = hcl::from_str(text).map_err(|e| ConfigError::parse(origin, e))?;
    config.validate()?;
    Ok(config)
}

/// An explicit path must exist. Without one, `archon.hcl` in the working
/// directory is used if present, otherwise built-in defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<ArchonConfig, ConfigError> {
    if let Some(path) = explicit {
        return load_config(path);
    }

    let fallback = Path::new(DEFAULT_CONFIG_FILE);
    if fallback.is_file() {
        tracing::debug!(path = %fallback.display(), "using config from working directory");
        return load_config(fallback);
    }

    Ok(ArchonConfig::default())
}
