//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::BuildConfig;
use std::path::Path;

/// File name looked up inside a project directory.
pub const CONFIG_FILE_NAME: &str = "bitloom.toml";

/// Loads and validates a `bitloom.toml` configuration from a project directory.
pub fn load_config(project_dir: &Path) -> Result<BuildConfig, ConfigError> {
    let config_path = project_dir.join(CONFIG_FILE_NAME);
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `bitloom.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<BuildConfig, ConfigError> {
    let config: BuildConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &BuildConfig) -> Result<(), ConfigError> {
    if config.naming.temp_prefix.is_empty() {
        return Err(ConfigError::ValidationError(
            "naming.temp_prefix must not be empty".to_string(),
        ));
    }
    if config.naming.const_prefix.is_empty() {
        return Err(ConfigError::ValidationError(
            "naming.const_prefix must not be empty".to_string(),
        ));
    }
    if config.naming.temp_prefix == config.naming.const_prefix {
        return Err(ConfigError::ValidationError(format!(
            "naming prefixes must differ, both are '{}'",
            config.naming.temp_prefix
        )));
    }
    if config.sim.max_cycles == 0 {
        return Err(ConfigError::ValidationError(
            "sim.max_cycles must be at least 1".to_string(),
        ));
    }
    Ok(())
}
